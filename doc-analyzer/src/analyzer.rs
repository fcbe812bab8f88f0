//! The one pipeline every front-end runs: prompt check, normalization, a
//! single model call, and the answer.

use std::{sync::Arc, time::Instant};

use ai_llm_service::TextGenerator;
use tracing::{Instrument, info, info_span, warn};

use crate::{
    errors::AnalyzeError,
    file_kind::FileKind,
    input::InputFile,
    normalize::normalize,
    prompt::{Prompt, compose},
};

/// Shown when the model answered without any text.
pub const NO_TEXT_PLACEHOLDER: &str = "(No text response returned)";

/// Model output. `None` means the provider returned no text, which is not a failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer(Option<String>);

impl Answer {
    pub fn new(text: Option<String>) -> Self {
        Self(
            text.map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
        )
    }

    pub fn text(&self) -> Option<&str> {
        self.0.as_deref()
    }

    /// The answer text, or [`NO_TEXT_PLACEHOLDER`].
    pub fn display_text(&self) -> &str {
        self.text().unwrap_or(NO_TEXT_PLACEHOLDER)
    }
}

/// Result of one successful analyze call.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Name of the input as the caller supplied it.
    pub file_name: String,
    pub kind: FileKind,
    /// Trimmed prompt.
    pub prompt: String,
    pub answer: Answer,
}

/// Runs file → payload → model → answer on top of any [`TextGenerator`].
#[derive(Clone)]
pub struct DocumentAnalyzer {
    generator: Arc<dyn TextGenerator>,
}

impl DocumentAnalyzer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Analyzes one file with one prompt.
    ///
    /// Order matters: the prompt is checked first, then the extension, and
    /// only then are the bytes read. Invalid requests never reach the model.
    ///
    /// # Errors
    /// - [`AnalyzeError::EmptyPrompt`] for a blank prompt
    /// - [`AnalyzeError::Normalize`] for unsupported, unreadable or malformed files
    /// - [`AnalyzeError::Provider`] when the model call fails
    pub async fn analyze(&self, file: InputFile, prompt: &str) -> Result<Analysis, AnalyzeError> {
        let span = info_span!("analyze", file = %file.name());
        self.analyze_inner(file, prompt).instrument(span).await
    }

    async fn analyze_inner(&self, file: InputFile, prompt: &str) -> Result<Analysis, AnalyzeError> {
        let prompt = Prompt::parse(prompt)?;
        let kind = file.kind()?;
        let file_name = file.name().to_string();

        let bytes = file.into_bytes().await?;
        let payload = normalize(kind, bytes)?;
        let payload_size = payload.size();
        let request = compose(&prompt, payload);

        let started = Instant::now();
        let text = self
            .generator
            .generate(&request.prompt, request.attachment.as_ref())
            .await
            .map_err(|e| {
                warn!(%kind, error = %e, "model call failed");
                AnalyzeError::Provider(e)
            })?;
        let answer = Answer::new(text);

        info!(
            %kind,
            payload_size,
            prompt_len = request.prompt.len(),
            has_text = answer.text().is_some(),
            latency_ms = started.elapsed().as_millis(),
            "document analyzed"
        );

        Ok(Analysis {
            file_name,
            kind,
            prompt: prompt.as_str().to_string(),
            answer,
        })
    }
}
