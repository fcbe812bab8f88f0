//! Temporary on-disk copies of uploads.

use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

/// An upload written to a temp file. The file is removed when this value is
/// dropped, on success and error paths alike.
pub struct StagedUpload {
    file: NamedTempFile,
}

impl StagedUpload {
    /// Writes `bytes` to a fresh temp file ending in `suffix` (e.g. `.pdf`).
    pub async fn write(bytes: &[u8], suffix: &str) -> std::io::Result<Self> {
        let file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(suffix)
            .tempfile()?;
        tokio::fs::write(file.path(), bytes).await?;
        debug!(path = %file.path().display(), len = bytes.len(), "upload staged");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
