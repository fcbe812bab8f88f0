use ai_llm_service::Attachment;

/// Character cap for JSON/TXT excerpts (the model backend limits input size).
pub const TEXT_CHAR_LIMIT: usize = 15_000;

/// Number of CSV data rows kept in the rendered sample.
pub const CSV_SAMPLE_ROWS: usize = 10;

/// Media type used for PDFs passed to the model verbatim.
pub const PDF_MEDIA_TYPE: &str = "application/pdf";

/// Model-ready form of a document. Built per request, dropped after the call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NormalizedPayload {
    /// Bytes passed through untouched, tagged with a media type.
    Binary { media_type: String, bytes: Vec<u8> },
    /// Text that is appended to the prompt.
    Text { content: String },
}

impl NormalizedPayload {
    pub fn is_binary(&self) -> bool {
        matches!(self, NormalizedPayload::Binary { .. })
    }

    /// Text content, if this is a text payload.
    pub fn text(&self) -> Option<&str> {
        match self {
            NormalizedPayload::Text { content } => Some(content),
            NormalizedPayload::Binary { .. } => None,
        }
    }

    /// Size in bytes (binary) or characters (text), for logs.
    pub fn size(&self) -> usize {
        match self {
            NormalizedPayload::Binary { bytes, .. } => bytes.len(),
            NormalizedPayload::Text { content } => content.chars().count(),
        }
    }

    pub(crate) fn into_attachment(self) -> Result<Attachment, String> {
        match self {
            NormalizedPayload::Binary { media_type, bytes } => Ok(Attachment::new(media_type, bytes)),
            NormalizedPayload::Text { content } => Err(content),
        }
    }
}
