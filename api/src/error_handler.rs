use ai_llm_service::AiLlmError;
use axum::{
    Json,
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use doc_analyzer::{AnalyzeError, NormalizeError};
use serde::Serialize;
use thiserror::Error;

use crate::core::app_state::ConfigError;

/// Public application error type.
#[derive(Debug, Error)]
pub enum AppError {
    // --- Boot / config ---
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Llm(#[from] AiLlmError),

    // --- IO / network / server ---
    #[error("failed to bind listener on {addr}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("server error")]
    Server(#[source] std::io::Error),

    // --- Request / routing ---
    /// Rich HTTP error mapped from lower layers with specific status & code.
    #[error("{message}")]
    Http {
        status: StatusCode,
        code: &'static str,
        message: String,
    },
}

impl AppError {
    pub(crate) fn http(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        AppError::Http {
            status,
            code,
            message: message.into(),
        }
    }

    pub(crate) fn no_file() -> Self {
        Self::http(StatusCode::BAD_REQUEST, "NO_FILE", "No file uploaded")
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Http { status, .. } => *status,
            AppError::Config(_) | AppError::Llm(_) | AppError::Bind { .. } | AppError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Llm(_) => "LLM_ERROR",
            AppError::Bind { .. } => "BIND_ERROR",
            AppError::Server(_) => "SERVER_ERROR",
            AppError::Http { code, .. } => code,
        }
    }
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: String,
    code: &'a str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(%status, error = %self, "request failed");
        } else {
            tracing::warn!(%status, error = %self, "request rejected");
        }
        let body = ErrorBody {
            code: self.error_code(),
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

/// Handy result alias used across handlers.
pub type AppResult<T> = Result<T, AppError>;

/// A request that is not `multipart/form-data` carries no file.
impl From<MultipartRejection> for AppError {
    fn from(_: MultipartRejection) -> Self {
        AppError::no_file()
    }
}

impl From<MultipartError> for AppError {
    fn from(err: MultipartError) -> Self {
        let status = err.status();
        let code = if status == StatusCode::PAYLOAD_TOO_LARGE {
            "PAYLOAD_TOO_LARGE"
        } else {
            "INVALID_MULTIPART"
        };
        AppError::http(status, code, err.body_text())
    }
}

/// Maps analyzer failures to client (4xx) or server (5xx) statuses.
impl From<AnalyzeError> for AppError {
    fn from(err: AnalyzeError) -> Self {
        let message = err.to_string();
        match err {
            AnalyzeError::EmptyPrompt => AppError::http(StatusCode::BAD_REQUEST, "EMPTY_PROMPT", message),
            AnalyzeError::Normalize(inner) => match inner {
                NormalizeError::UnsupportedFileType { .. } => {
                    AppError::http(StatusCode::BAD_REQUEST, "UNSUPPORTED_FILE_TYPE", message)
                }
                NormalizeError::Parse { .. } => {
                    AppError::http(StatusCode::UNPROCESSABLE_ENTITY, "PARSE_ERROR", message)
                }
                NormalizeError::Decode { .. } => {
                    AppError::http(StatusCode::UNPROCESSABLE_ENTITY, "DECODE_ERROR", message)
                }
                NormalizeError::Io { .. } => {
                    AppError::http(StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR", message)
                }
            },
            AnalyzeError::Provider(AiLlmError::Timeout(_)) => {
                AppError::http(StatusCode::GATEWAY_TIMEOUT, "PROVIDER_TIMEOUT", message)
            }
            AnalyzeError::Provider(_) => {
                AppError::http(StatusCode::BAD_GATEWAY, "PROVIDER_ERROR", message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn analyzer_errors_split_into_client_and_server_statuses() {
        let cases = [
            (AnalyzeError::EmptyPrompt, StatusCode::BAD_REQUEST),
            (
                AnalyzeError::Normalize(NormalizeError::UnsupportedFileType { extension: None }),
                StatusCode::BAD_REQUEST,
            ),
            (
                AnalyzeError::Normalize(NormalizeError::Decode { valid_up_to: 0 }),
                StatusCode::UNPROCESSABLE_ENTITY,
            ),
            (
                AnalyzeError::Provider(AiLlmError::Timeout(Duration::from_secs(1))),
                StatusCode::GATEWAY_TIMEOUT,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status_code(), status);
        }
    }
}
