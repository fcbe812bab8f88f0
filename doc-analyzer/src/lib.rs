//! Document analysis core shared by the HTTP server, the chat shell and the
//! batch summarizer.
//!
//! Pipeline: validate the prompt, detect the [`FileKind`] from the name,
//! read the bytes, normalize them into a [`NormalizedPayload`], compose one
//! model request and hand it to a [`TextGenerator`](ai_llm_service::TextGenerator).

mod analyzer;
mod errors;
mod file_kind;
mod input;
pub mod normalize;
mod payload;
mod prompt;

pub use analyzer::{Analysis, Answer, DocumentAnalyzer, NO_TEXT_PLACEHOLDER};
pub use errors::{AnalyzeError, NormalizeError};
pub use file_kind::FileKind;
pub use input::InputFile;
pub use normalize::{normalize, normalize_named};
pub use payload::{CSV_SAMPLE_ROWS, NormalizedPayload, PDF_MEDIA_TYPE, TEXT_CHAR_LIMIT};
pub use prompt::{ModelRequest, Prompt, compose};
