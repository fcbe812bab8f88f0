use ai_llm_service::Attachment;

use crate::{errors::AnalyzeError, payload::NormalizedPayload};

/// A user prompt that is non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt(String);

impl Prompt {
    /// Trims `raw` and rejects it if nothing is left.
    ///
    /// # Errors
    /// [`AnalyzeError::EmptyPrompt`] for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Result<Self, AnalyzeError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            Err(AnalyzeError::EmptyPrompt)
        } else {
            Ok(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One model call: the text sent as prompt and an optional binary part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRequest {
    pub prompt: String,
    pub attachment: Option<Attachment>,
}

/// Binary payloads travel next to the prompt; text payloads are appended as
/// `"{prompt}\n\n{content}"`.
pub fn compose(prompt: &Prompt, payload: NormalizedPayload) -> ModelRequest {
    match payload.into_attachment() {
        Ok(attachment) => ModelRequest {
            prompt: prompt.as_str().to_string(),
            attachment: Some(attachment),
        },
        Err(content) => ModelRequest {
            prompt: format!("{}\n\n{}", prompt.as_str(), content),
            attachment: None,
        },
    }
}
