use serde::Serialize;

/// Response payload for `POST /analyze`.
#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    /// File name as uploaded.
    pub filename: String,
    /// Prompt after trimming.
    pub prompt: String,
    /// Model answer, or the no-text placeholder.
    pub answer: String,
}
