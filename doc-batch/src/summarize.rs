//! Summarize one path and render the result the way the batch prints it.

use std::{
    fmt,
    path::{Path, PathBuf},
};

use doc_analyzer::{DocumentAnalyzer, InputFile};
use tracing::{info, warn};

pub const SUMMARY_PROMPT: &str = "Summarize this document in simple terms.";

pub const DEFAULT_PATHS: [&str; 4] = [
    "data/what is semisupervised ml.pdf",
    "data/sample.json",
    "data/OOPs_practicals.txt",
    "data/weatherPrediction.csv",
];

/// What happened to one path. Failures never stop the batch.
#[derive(Debug)]
pub enum Outcome {
    Summary { name: String, text: String },
    NotFound(PathBuf),
    Failed { name: String, message: String },
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Summary { name, text } => write!(f, "\n--- Summary for {name} ---\n\n{text}"),
            Outcome::NotFound(path) => write!(f, "\n⚠ File not found: {}\n", path.display()),
            Outcome::Failed { name, message } => {
                write!(f, "\n--- Summary for {name} ---\n\n{message}")
            }
        }
    }
}

pub async fn summarize(analyzer: &DocumentAnalyzer, path: &Path) -> Outcome {
    if !tokio::fs::try_exists(path).await.unwrap_or(false) {
        warn!(path = %path.display(), "file not found");
        return Outcome::NotFound(path.to_path_buf());
    }

    let input = InputFile::from_path(path);
    let name = input.name().to_string();
    match analyzer.analyze(input, SUMMARY_PROMPT).await {
        Ok(analysis) => {
            info!(file = %name, kind = %analysis.kind, "summary ready");
            Outcome::Summary {
                name,
                text: analysis.answer.display_text().to_string(),
            }
        }
        Err(e) => {
            warn!(file = %name, error = %e, "summary failed");
            Outcome::Failed {
                name,
                message: e.to_string(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::Write, sync::Arc};

    use ai_llm_service::{AiLlmError, Attachment, TextGenerator};
    use async_trait::async_trait;

    struct Echo;

    #[async_trait]
    impl TextGenerator for Echo {
        async fn generate(
            &self,
            prompt: &str,
            attachment: Option<&Attachment>,
        ) -> Result<Option<String>, AiLlmError> {
            Ok(Some(match attachment {
                Some(a) => format!("{} bytes of {}", a.bytes.len(), a.media_type),
                None => prompt.lines().last().unwrap_or_default().to_string(),
            }))
        }
    }

    fn analyzer() -> DocumentAnalyzer {
        DocumentAnalyzer::new(Arc::new(Echo))
    }

    fn fixture(dir: &Path, name: &str, body: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::File::create(&path).unwrap().write_all(body).unwrap();
        path
    }

    #[tokio::test]
    async fn summarizes_each_supported_kind() {
        let dir = tempfile::tempdir().unwrap();
        let txt = fixture(dir.path(), "notes.txt", b"first\nlast line");
        let pdf = fixture(dir.path(), "paper.pdf", b"%PDF-1.7");

        match summarize(&analyzer(), &txt).await {
            Outcome::Summary { name, text } => {
                assert_eq!(name, "notes.txt");
                assert_eq!(text, "last line");
            }
            other => panic!("unexpected {other:?}"),
        }
        match summarize(&analyzer(), &pdf).await {
            Outcome::Summary { text, .. } => assert_eq!(text, "8 bytes of application/pdf"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_file_is_reported_and_rendered() {
        let out = summarize(&analyzer(), Path::new("/no/such/sample.json")).await;
        assert!(matches!(out, Outcome::NotFound(_)));
        assert_eq!(out.to_string(), "\n⚠ File not found: /no/such/sample.json\n");
    }

    #[tokio::test]
    async fn failures_carry_the_error_message() {
        let dir = tempfile::tempdir().unwrap();
        let bad = fixture(dir.path(), "broken.json", b"{\"a\":");
        let docx = fixture(dir.path(), "memo.docx", b"PK");

        let out = summarize(&analyzer(), &bad).await;
        assert!(matches!(out, Outcome::Failed { .. }));
        assert!(out.to_string().starts_with("\n--- Summary for broken.json ---\n\n"));

        let out = summarize(&analyzer(), &docx).await;
        assert!(
            out.to_string()
                .ends_with("Unsupported file type. Please upload PDF, JSON, TXT, or CSV.")
        );
    }
}
