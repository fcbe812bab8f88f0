//! `doc-batch`: summarize several documents with one fixed prompt.
//!
//! ```text
//! doc-batch                          # the default data/ files
//! doc-batch report.pdf figures.csv
//! ```

mod summarize;

use std::{path::PathBuf, sync::Arc};

use ai_llm_service::{
    GeminiService, config_gemini,
    telemetry::{self, Sink},
};
use clap::Parser;
use doc_analyzer::DocumentAnalyzer;
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::summarize::{DEFAULT_PATHS, summarize};

const LOG_TARGETS: &[&str] = &["doc_batch", "doc_analyzer", "ai_llm_service"];

#[derive(Parser)]
#[command(name = "doc-batch")]
#[command(about = "Summarize PDF, JSON, TXT and CSV files using Gemini", long_about = None)]
struct Cli {
    /// Files to summarize; defaults to the sample files under data/
    paths: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::WARN))
        .with(telemetry::layer(LOG_TARGETS, Sink::Stderr))
        .init();

    let analyzer = DocumentAnalyzer::new(Arc::new(GeminiService::new(config_gemini()?)?));

    let paths = if cli.paths.is_empty() {
        DEFAULT_PATHS.iter().map(PathBuf::from).collect()
    } else {
        cli.paths
    };

    for path in &paths {
        println!("{}", summarize(&analyzer, path).await);
    }

    Ok(())
}
