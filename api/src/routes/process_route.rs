//! GET /process: usage hint.

use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ProcessInfo {
    pub message: &'static str,
}

pub async fn process_info() -> Json<ProcessInfo> {
    Json(ProcessInfo {
        message: "Use POST /analyze to upload and analyze PDF, JSON, TXT, or CSV files.",
    })
}
