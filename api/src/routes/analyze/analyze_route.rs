//! POST /analyze: answers a prompt about an uploaded PDF, JSON, TXT or CSV file.

use std::sync::Arc;

use axum::{
    Json,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::StatusCode,
};
use doc_analyzer::{AnalyzeError, FileKind, InputFile, Prompt};
use tracing::info;

use crate::{
    core::{app_state::AppState, staging::StagedUpload},
    error_handler::{AppError, AppResult},
    routes::analyze::{analyze_form::AnalyzeForm, analyze_response::AnalyzeResponse},
};

/// Handler: POST /analyze
///
/// Validation order: file present, prompt non-empty, extension supported.
/// PDFs are staged to a temp file that lives until the model call returns.
///
/// # Example
/// ```bash
/// curl -X POST http://127.0.0.1:5000/analyze \
///   -F 'file=@report.pdf' \
///   -F 'prompt=Summarize the key findings'
/// ```
pub async fn analyze_file(
    State(state): State<Arc<AppState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> AppResult<Json<AnalyzeResponse>> {
    let form = AnalyzeForm::read(multipart?).await?;

    let upload = form.file.ok_or_else(AppError::no_file)?;
    let prompt = Prompt::parse(form.prompt.as_deref().unwrap_or_default())?;
    let kind = FileKind::from_file_name(&upload.file_name).map_err(AnalyzeError::from)?;

    info!(
        file = %upload.file_name,
        %kind,
        size = upload.bytes.len(),
        "analyze request accepted"
    );

    let (staged, input) = match kind {
        FileKind::Pdf => {
            let staged = StagedUpload::write(&upload.bytes, ".pdf")
                .await
                .map_err(|e| {
                    AppError::http(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "IO_ERROR",
                        format!("failed to stage upload: {e}"),
                    )
                })?;
            let input = InputFile::from_path_named(&upload.file_name, staged.path());
            (Some(staged), input)
        }
        _ => (None, InputFile::from_bytes(&upload.file_name, upload.bytes)),
    };

    let result = state.analyzer.analyze(input, prompt.as_str()).await;
    drop(staged);
    let analysis = result?;

    Ok(Json(AnalyzeResponse {
        filename: analysis.file_name,
        prompt: analysis.prompt,
        answer: analysis.answer.display_text().to_string(),
    }))
}
