//! One chat session: the selected document, the transcript and the commands.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use doc_analyzer::{AnalyzeError, DocumentAnalyzer, InputFile, Prompt};
use thiserror::Error;

/// Who said a line of the transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    You,
    Gemini,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::You => f.write_str("You"),
            Speaker::Gemini => f.write_str("Gemini"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Turn {
    pub speaker: Speaker,
    pub message: String,
}

/// A line typed at the prompt.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Ask(String),
    /// `:file <path>`
    File(PathBuf),
    /// `:history`
    History,
    /// `:quit` or `:q`
    Quit,
    /// Unknown `:` command; shown back to the user.
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let Some(rest) = line.strip_prefix(':') else {
            return Command::Ask(line.to_string());
        };
        let (name, arg) = match rest.split_once(char::is_whitespace) {
            Some((name, arg)) => (name, arg.trim()),
            None => (rest, ""),
        };
        match name {
            "file" if !arg.is_empty() => Command::File(PathBuf::from(arg)),
            "history" => Command::History,
            "quit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("No file selected. Use :file <path> to pick one.")]
    NoFile,

    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

/// Transcript and current document. History only grows on successful turns.
pub struct ChatSession {
    analyzer: DocumentAnalyzer,
    file: Option<PathBuf>,
    history: Vec<Turn>,
}

impl ChatSession {
    pub fn new(analyzer: DocumentAnalyzer, file: Option<PathBuf>) -> Self {
        Self {
            analyzer,
            file,
            history: Vec::new(),
        }
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn select_file(&mut self, path: PathBuf) {
        self.file = Some(path);
    }

    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// Asks one question about the selected file and returns the answer text
    /// (or the no-text placeholder).
    ///
    /// An empty question is rejected before the file is even looked at.
    pub async fn ask(&mut self, question: &str) -> Result<String, ChatError> {
        let prompt = Prompt::parse(question)?;
        let path = self.file.as_ref().ok_or(ChatError::NoFile)?;

        let analysis = self
            .analyzer
            .analyze(InputFile::from_path(path), prompt.as_str())
            .await?;
        let answer = analysis.answer.display_text().to_string();

        self.history.push(Turn {
            speaker: Speaker::You,
            message: analysis.prompt,
        });
        self.history.push(Turn {
            speaker: Speaker::Gemini,
            message: answer.clone(),
        });
        Ok(answer)
    }
}
