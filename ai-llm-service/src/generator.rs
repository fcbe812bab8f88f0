//! Single-method seam between callers and a hosted model.
//!
//! Everything above this crate talks to the model through [`TextGenerator`],
//! so tests can swap the network client for a stub.

use async_trait::async_trait;

use crate::error_handler::AiLlmError;

/// Binary content sent to the model next to the prompt (e.g. a PDF).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    /// IANA media type, e.g. `application/pdf`.
    pub media_type: String,
    /// Raw bytes; encoding for the wire is the client's job.
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn new(media_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            media_type: media_type.into(),
            bytes,
        }
    }
}

/// Unary, non-streaming text generation.
///
/// Returns `Ok(None)` when the provider answered successfully but produced no
/// text. Callers must keep that apart from failures.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        attachment: Option<&Attachment>,
    ) -> Result<Option<String>, AiLlmError>;
}
