//! Shared LLM plumbing: Gemini client, the [`TextGenerator`] seam, config from
//! env, unified errors, health probe and a library-scoped tracing layer.

pub mod config;
pub mod error_handler;
pub mod generator;
pub mod health_service;
pub mod services;
pub mod telemetry;

pub use config::{
    default_config::config_gemini, llm_model_config::LlmModelConfig, llm_provider::LlmProvider,
};
pub use error_handler::{AiLlmError, ConfigError};
pub use generator::{Attachment, TextGenerator};
pub use health_service::{HealthService, HealthStatus};
pub use services::gemini_service::GeminiService;
