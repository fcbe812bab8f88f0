//! `doc-chat`: ask questions about a PDF, JSON, TXT or CSV file from the terminal.
//!
//! ```text
//! doc-chat --file data/weatherPrediction.csv
//! > What trends do you see?
//! :file <path>   switch document
//! :history       reprint the transcript
//! :quit          leave (EOF works too)
//! ```

mod session;
mod spinner;

use std::{io::Write, path::PathBuf, sync::Arc};

use ai_llm_service::{
    GeminiService, config_gemini,
    telemetry::{self, Sink},
};
use clap::Parser;
use colored::Colorize;
use doc_analyzer::DocumentAnalyzer;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::Level;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{
    session::{ChatError, ChatSession, Command, Speaker},
    spinner::Spinner,
};

const LOG_TARGETS: &[&str] = &["doc_chat", "doc_analyzer", "ai_llm_service"];

#[derive(Parser)]
#[command(name = "doc-chat")]
#[command(about = "Chat with a document using Gemini", long_about = None)]
struct Cli {
    /// Document to ask about (pdf, json, txt or csv)
    #[arg(long, short)]
    file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(telemetry::env_filter_with_level("warn", Level::WARN))
        .with(telemetry::layer(LOG_TARGETS, Sink::Stderr))
        .init();

    let gemini = GeminiService::new(config_gemini()?)?;
    let mut chat = ChatSession::new(DocumentAnalyzer::new(Arc::new(gemini)), cli.file);

    println!("{}", "Chat with Documents using Gemini".bold());
    match chat.file() {
        Some(path) => println!("Using {}", path.display().to_string().cyan()),
        None => println!("Pick a document with {}", ":file <path>".cyan()),
    }
    println!("{}", "Type a question, :history or :quit".dimmed());

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".green().bold());
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            println!();
            break;
        };

        match Command::parse(&line) {
            Command::Quit => break,
            Command::History => print_history(&chat),
            Command::File(path) => {
                println!("Using {}", path.display().to_string().cyan());
                chat.select_file(path);
            }
            Command::Unknown(cmd) => println!("{} {cmd}", "Unknown command:".yellow()),
            Command::Ask(question) => {
                let spinner = Spinner::start("Generating response...");
                let result = chat.ask(&question).await;
                spinner.stop();
                match result {
                    Ok(answer) => println!("{} {answer}", "Gemini:".blue().bold()),
                    Err(e) => print_error(&e),
                }
            }
        }
    }

    Ok(())
}

/// Input problems are the user's to fix and print softer than failures.
fn print_error(err: &ChatError) {
    let label = match err {
        ChatError::NoFile => "Note:".yellow().bold(),
        ChatError::Analyze(e) if e.is_validation() => "Note:".yellow().bold(),
        ChatError::Analyze(e) if e.is_content() => "Could not read file:".yellow().bold(),
        ChatError::Analyze(_) => "Error:".red().bold(),
    };
    println!("{label} {err}");
}

fn print_history(chat: &ChatSession) {
    if chat.history().is_empty() {
        println!("{}", "(no messages yet)".dimmed());
        return;
    }
    for turn in chat.history() {
        let who = match turn.speaker {
            Speaker::You => format!("{}:", turn.speaker).green().bold(),
            Speaker::Gemini => format!("{}:", turn.speaker).blue().bold(),
        };
        println!("{who} {}", turn.message);
    }
}
