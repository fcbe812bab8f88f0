use std::path::{Path, PathBuf};

use crate::{errors::NormalizeError, file_kind::FileKind};

/// Where the bytes of an [`InputFile`] come from.
#[derive(Debug, Clone)]
enum Body {
    Memory(Vec<u8>),
    Disk(PathBuf),
}

/// A named document handed in by a caller. Consumed by one analyze call.
///
/// Disk-backed files are read lazily, after the prompt and the extension have
/// been validated.
#[derive(Debug, Clone)]
pub struct InputFile {
    name: String,
    body: Body,
}

impl InputFile {
    /// An upload that is already in memory.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            body: Body::Memory(bytes),
        }
    }

    /// A file on disk, named after its final path component.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_path_named(name, path)
    }

    /// A file on disk whose logical name differs from the path (staged uploads).
    pub fn from_path_named(name: impl Into<String>, path: impl AsRef<Path>) -> Self {
        Self {
            name: name.into(),
            body: Body::Disk(path.as_ref().to_path_buf()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Kind derived from the name's extension.
    pub fn kind(&self) -> Result<FileKind, NormalizeError> {
        FileKind::from_file_name(&self.name)
    }

    /// Consumes the file and returns its bytes.
    pub async fn into_bytes(self) -> Result<Vec<u8>, NormalizeError> {
        match self.body {
            Body::Memory(bytes) => Ok(bytes),
            Body::Disk(path) => tokio::fs::read(&path)
                .await
                .map_err(|source| NormalizeError::Io { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_name_is_final_component() {
        let f = InputFile::from_path("data/what is semisupervised ml.pdf");
        assert_eq!(f.name(), "what is semisupervised ml.pdf");
        assert_eq!(f.kind().unwrap(), FileKind::Pdf);
    }

    #[tokio::test]
    async fn missing_file_reports_not_found() {
        let err = InputFile::from_path("/definitely/not/here.txt")
            .into_bytes()
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
