//! Default LLM config loaded strictly from environment variables.
//!
//! # Environment variables
//!
//! - `GOOGLE_API_KEY`   = API key (mandatory)
//! - `GEMINI_MODEL`     = model id (default `gemini-2.0-flash`)
//! - `GEMINI_ENDPOINT`  = API base URL (default `https://generativelanguage.googleapis.com`)
//! - `LLM_MAX_TOKENS`   = optional max output tokens (u32)
//! - `LLM_TEMPERATURE`  = optional temperature (`0.0..=2.0`)
//! - `LLM_TIMEOUT_SECS` = request timeout (u64, default 120)

use crate::{
    config::{llm_model_config::LlmModelConfig, llm_provider::LlmProvider},
    error_handler::{
        AiLlmError, env_opt, env_opt_f32, env_opt_u32, env_opt_u64, must_env,
        validate_http_endpoint, validate_range_f32,
    },
};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Constructs the Gemini config from the process environment.
///
/// A missing `GOOGLE_API_KEY` is a startup failure for every caller.
///
/// # Errors
/// Returns [`AiLlmError::Config`] if `GOOGLE_API_KEY` is absent or blank, or
/// if an optional knob is malformed.
pub fn config_gemini() -> Result<LlmModelConfig, AiLlmError> {
    config_gemini_from(|name| std::env::var(name).ok())
}

/// Same as [`config_gemini`] but reads variables through `lookup`.
pub fn config_gemini_from<F>(lookup: F) -> Result<LlmModelConfig, AiLlmError>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = must_env(&lookup, "GOOGLE_API_KEY")?;

    let model = env_opt(&lookup, "GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.into());

    let endpoint =
        env_opt(&lookup, "GEMINI_ENDPOINT").unwrap_or_else(|| DEFAULT_GEMINI_ENDPOINT.into());
    validate_http_endpoint("GEMINI_ENDPOINT", &endpoint)?;

    let max_tokens = env_opt_u32(&lookup, "LLM_MAX_TOKENS")?;
    let temperature = env_opt_f32(&lookup, "LLM_TEMPERATURE")?;
    if let Some(t) = temperature {
        validate_range_f32("temperature", t, 0.0, 2.0, "expected 0.0..=2.0")?;
    }
    let timeout_secs = env_opt_u64(&lookup, "LLM_TIMEOUT_SECS")?.unwrap_or(DEFAULT_TIMEOUT_SECS);

    Ok(LlmModelConfig {
        provider: LlmProvider::Gemini,
        model,
        endpoint,
        api_key: Some(api_key),
        max_tokens,
        temperature,
        top_p: None,
        timeout_secs: Some(timeout_secs),
    })
}
