//! Typed errors for the doc-analyzer crate.

use std::path::PathBuf;

use ai_llm_service::AiLlmError;
use thiserror::Error;

use crate::file_kind::FileKind;

/// Why a file could not be turned into a model payload.
#[derive(Debug, Error)]
pub enum NormalizeError {
    /// Extension is not one of pdf/json/txt/csv.
    #[error("Unsupported file type. Please upload PDF, JSON, TXT, or CSV.")]
    UnsupportedFileType {
        /// Lowercased extension, if the name had one.
        extension: Option<String>,
    },

    /// JSON or CSV content is malformed.
    #[error("failed to parse {kind} file: {message}")]
    Parse { kind: FileKind, message: String },

    /// Text file is not valid UTF-8.
    #[error("failed to decode text file as UTF-8: invalid byte sequence at offset {valid_up_to}")]
    Decode { valid_up_to: usize },

    /// The file could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl NormalizeError {
    pub(crate) fn parse(kind: FileKind, err: impl std::fmt::Display) -> Self {
        NormalizeError::Parse {
            kind,
            message: err.to_string(),
        }
    }

    /// `true` when the file was not found on disk.
    pub fn is_not_found(&self) -> bool {
        matches!(self, NormalizeError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

/// Failure of one analyze call. Every variant is non-fatal for the caller.
#[derive(Debug, Error)]
pub enum AnalyzeError {
    /// Prompt was empty or whitespace only.
    #[error("Please provide a text prompt")]
    EmptyPrompt,

    /// Unsupported type, malformed content or unreadable file.
    #[error(transparent)]
    Normalize(#[from] NormalizeError),

    /// The model call failed; the provider's message is kept as is.
    #[error("{0}")]
    Provider(#[source] AiLlmError),
}

impl AnalyzeError {
    /// Caller-side input problems (empty prompt, unsupported extension).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AnalyzeError::EmptyPrompt
                | AnalyzeError::Normalize(NormalizeError::UnsupportedFileType { .. })
        )
    }

    /// Malformed file content (`Parse`/`Decode`).
    pub fn is_content(&self) -> bool {
        matches!(
            self,
            AnalyzeError::Normalize(NormalizeError::Parse { .. } | NormalizeError::Decode { .. })
        )
    }
}
