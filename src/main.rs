use ai_llm_service::telemetry::{self, Sink};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const LOG_TARGETS: &[&str] = &["doc_qa_backend", "api", "doc_analyzer", "ai_llm_service"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file; a missing file is fine.
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("info", Level::INFO))
        .with(telemetry::layer(LOG_TARGETS, Sink::Stdout))
        .init();

    // Missing GOOGLE_API_KEY ends the process here, before anything is served.
    let state = api::core::app_state::AppState::from_env()?;
    api::start(state).await?;

    Ok(())
}
