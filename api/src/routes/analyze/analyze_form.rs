use axum::extract::Multipart;

use crate::error_handler::AppResult;

/// One uploaded file.
#[derive(Debug)]
pub struct Upload {
    /// Client-supplied file name (may be empty).
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Multipart form of `POST /analyze`: `file` and `prompt`.
#[derive(Debug, Default)]
pub struct AnalyzeForm {
    pub file: Option<Upload>,
    pub prompt: Option<String>,
}

impl AnalyzeForm {
    /// Drains the multipart stream. Unknown fields are skipped; if a field
    /// repeats, the first one wins.
    pub async fn read(mut multipart: Multipart) -> AppResult<Self> {
        let mut form = AnalyzeForm::default();

        while let Some(field) = multipart.next_field().await? {
            let name = field.name().map(str::to_string);
            match name.as_deref() {
                Some("file") if form.file.is_none() => {
                    let file_name = field.file_name().unwrap_or_default().to_string();
                    let bytes = field.bytes().await?.to_vec();
                    form.file = Some(Upload { file_name, bytes });
                }
                Some("prompt") if form.prompt.is_none() => {
                    form.prompt = Some(field.text().await?);
                }
                _ => {}
            }
        }

        Ok(form)
    }
}
