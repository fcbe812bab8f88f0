/// Represents the provider (backend) used for large language model (LLM) inference.
///
/// Only Google's Gemini `generateContent` API is wired today. Adding more
/// providers can be done by extending this enum and routing in
/// [`crate::services`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LlmProvider {
    /// Google Generative Language API (Gemini models).
    Gemini,
}
