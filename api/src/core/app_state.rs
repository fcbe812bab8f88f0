use std::sync::Arc;

use ai_llm_service::{GeminiService, HealthService, LlmModelConfig, config_gemini};
use doc_analyzer::DocumentAnalyzer;
use thiserror::Error;

use crate::error_handler::AppError;

pub const DEFAULT_API_ADDRESS: &str = "127.0.0.1:5000";
/// Gemini accepts inline data up to roughly 20 MiB per request.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Invalid server settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid number in {var}: {value:?}")]
    InvalidNumber { var: &'static str, value: String },
}

/// Server-side knobs, separate from the model config.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Bind address, e.g. `127.0.0.1:5000`.
    pub address: String,
    /// Request body cap for `/analyze` uploads.
    pub max_upload_bytes: usize,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_API_ADDRESS.into(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl ApiConfig {
    /// Reads `API_ADDRESS` and `MAX_UPLOAD_BYTES` from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| lookup(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let address = non_empty("API_ADDRESS").unwrap_or_else(|| DEFAULT_API_ADDRESS.into());
        let max_upload_bytes = match non_empty("MAX_UPLOAD_BYTES") {
            Some(v) => v.parse::<usize>().map_err(|_| ConfigError::InvalidNumber {
                var: "MAX_UPLOAD_BYTES",
                value: v,
            })?,
            None => DEFAULT_MAX_UPLOAD_BYTES,
        };

        Ok(Self {
            address,
            max_upload_bytes,
        })
    }
}

/// Shared state for all HTTP handlers.
pub struct AppState {
    /// File → payload → model pipeline.
    pub analyzer: DocumentAnalyzer,
    /// Model config, used by `/health`.
    pub llm_config: LlmModelConfig,
    pub health: HealthService,
    pub config: ApiConfig,
}

impl AppState {
    /// Builds the state from environment variables.
    ///
    /// # Errors
    /// Fails when `GOOGLE_API_KEY` is missing or any setting is malformed;
    /// callers treat this as fatal and never start serving.
    pub fn from_env() -> Result<Arc<Self>, AppError> {
        let config = ApiConfig::from_env()?;
        let llm_config = config_gemini()?;
        let gemini = GeminiService::new(llm_config.clone())?;
        let health = HealthService::new(Some(10))?;

        Ok(Arc::new(Self {
            analyzer: DocumentAnalyzer::new(Arc::new(gemini)),
            llm_config,
            health,
            config,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_config_defaults_and_overrides() {
        let cfg = ApiConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg.address, DEFAULT_API_ADDRESS);
        assert_eq!(cfg.max_upload_bytes, DEFAULT_MAX_UPLOAD_BYTES);

        let cfg = ApiConfig::from_lookup(|k| match k {
            "API_ADDRESS" => Some("0.0.0.0:8080".into()),
            "MAX_UPLOAD_BYTES" => Some("1024".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(cfg.address, "0.0.0.0:8080");
        assert_eq!(cfg.max_upload_bytes, 1024);

        assert!(ApiConfig::from_lookup(|k| (k == "MAX_UPLOAD_BYTES").then(|| "lots".into())).is_err());
    }
}
