use std::fmt;

use crate::errors::NormalizeError;

/// Supported document kinds, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FileKind {
    Pdf,
    Json,
    Txt,
    Csv,
}

impl FileKind {
    /// Every supported extension, in display order.
    pub const EXTENSIONS: [&'static str; 4] = ["pdf", "json", "txt", "csv"];

    /// Maps an extension (without the dot, any case) to a kind.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(FileKind::Pdf),
            "json" => Some(FileKind::Json),
            "txt" => Some(FileKind::Txt),
            "csv" => Some(FileKind::Csv),
            _ => None,
        }
    }

    /// Detects the kind from a file name; the extension is whatever follows the last dot.
    ///
    /// # Errors
    /// [`NormalizeError::UnsupportedFileType`] for names without a supported extension.
    pub fn from_file_name(name: &str) -> Result<Self, NormalizeError> {
        let extension = name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty());

        extension
            .as_deref()
            .and_then(FileKind::from_extension)
            .ok_or(NormalizeError::UnsupportedFileType { extension })
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FileKind::Pdf => "pdf",
            FileKind::Json => "json",
            FileKind::Txt => "txt",
            FileKind::Csv => "csv",
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_match_is_case_insensitive() {
        assert_eq!(FileKind::from_file_name("Report.PDF").unwrap(), FileKind::Pdf);
        assert_eq!(FileKind::from_file_name("data.v2.Json").unwrap(), FileKind::Json);
        assert_eq!(FileKind::from_file_name("notes.txt").unwrap(), FileKind::Txt);
        assert_eq!(FileKind::from_file_name("weather.CSV").unwrap(), FileKind::Csv);
    }

    #[test]
    fn unsupported_names_keep_their_extension() {
        match FileKind::from_file_name("memo.DOCX") {
            Err(NormalizeError::UnsupportedFileType { extension }) => {
                assert_eq!(extension.as_deref(), Some("docx"))
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(matches!(
            FileKind::from_file_name("README"),
            Err(NormalizeError::UnsupportedFileType { extension: None })
        ));
        assert!(FileKind::from_file_name("trailing.").is_err());
        assert!(FileKind::from_file_name("report.pdf ").is_err());
    }
}
