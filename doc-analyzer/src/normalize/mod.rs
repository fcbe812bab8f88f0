//! File-to-payload normalization.
//!
//! | kind | policy |
//! |------|--------|
//! | pdf  | raw bytes, `application/pdf` |
//! | json | parse, pretty-print (2 spaces, sorted keys), truncate |
//! | txt  | strict UTF-8 decode, truncate |
//! | csv  | parse, keep first [`CSV_SAMPLE_ROWS`] rows, fixed-width table |
//!
//! JSON/TXT are truncated at [`TEXT_CHAR_LIMIT`] characters. CSV is sampled
//! by rows instead so the excerpt stays a well-formed table.

mod csv_table;
mod json;
mod text;

pub use csv_table::render_csv_sample;
pub use json::normalize_json;
pub use text::{decode_text, truncate_chars};

use tracing::debug;

use crate::{
    errors::NormalizeError,
    file_kind::FileKind,
    payload::{CSV_SAMPLE_ROWS, NormalizedPayload, PDF_MEDIA_TYPE, TEXT_CHAR_LIMIT},
};

/// Normalizes `bytes` according to `kind`.
///
/// # Errors
/// [`NormalizeError::Parse`] for malformed JSON/CSV and
/// [`NormalizeError::Decode`] for text that is not UTF-8.
pub fn normalize(kind: FileKind, bytes: Vec<u8>) -> Result<NormalizedPayload, NormalizeError> {
    let input_len = bytes.len();
    let payload = match kind {
        FileKind::Pdf => NormalizedPayload::Binary {
            media_type: PDF_MEDIA_TYPE.to_string(),
            bytes,
        },
        FileKind::Json => NormalizedPayload::Text {
            content: normalize_json(&bytes, TEXT_CHAR_LIMIT)?,
        },
        FileKind::Txt => {
            let decoded = decode_text(&bytes)?;
            NormalizedPayload::Text {
                content: truncate_chars(decoded, TEXT_CHAR_LIMIT).to_string(),
            }
        }
        FileKind::Csv => NormalizedPayload::Text {
            content: render_csv_sample(&bytes, CSV_SAMPLE_ROWS)?,
        },
    };

    debug!(%kind, input_len, payload_size = payload.size(), "file normalized");
    Ok(payload)
}

/// Detects the kind from `name` and normalizes `bytes`.
///
/// # Errors
/// [`NormalizeError::UnsupportedFileType`] before looking at the bytes, then
/// whatever [`normalize`] reports.
pub fn normalize_named(name: &str, bytes: Vec<u8>) -> Result<NormalizedPayload, NormalizeError> {
    let kind = FileKind::from_file_name(name)?;
    normalize(kind, bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_supported_kind_yields_expected_tag() {
        let pdf = normalize(FileKind::Pdf, b"%PDF-1.7 fake".to_vec()).unwrap();
        assert_eq!(
            pdf,
            NormalizedPayload::Binary {
                media_type: "application/pdf".into(),
                bytes: b"%PDF-1.7 fake".to_vec()
            }
        );

        let json = normalize(FileKind::Json, br#"{"a":1}"#.to_vec()).unwrap();
        assert_eq!(json.text(), Some("{\n  \"a\": 1\n}"));

        let txt = normalize(FileKind::Txt, b"hello".to_vec()).unwrap();
        assert_eq!(txt.text(), Some("hello"));

        let csv = normalize(FileKind::Csv, b"x,y\n1,2\n".to_vec()).unwrap();
        assert!(!csv.is_binary());
    }

    #[test]
    fn pdf_bytes_are_not_inspected() {
        let garbage = vec![0xff, 0x00, 0xfe];
        let payload = normalize(FileKind::Pdf, garbage.clone()).unwrap();
        assert_eq!(payload.size(), garbage.len());
    }

    #[test]
    fn long_text_is_cut_to_exactly_the_limit() {
        let body = "abcdefghij".repeat(2_000);
        let payload = normalize(FileKind::Txt, body.clone().into_bytes()).unwrap();
        let content = payload.text().unwrap();
        assert_eq!(content.chars().count(), TEXT_CHAR_LIMIT);
        assert_eq!(content, &body[..TEXT_CHAR_LIMIT]);
    }

    #[test]
    fn long_json_is_prefix_of_canonical_form() {
        let items: Vec<_> = (0..2_000).map(|i| serde_json::json!({"id": i, "tag": "row"})).collect();
        let raw = serde_json::to_vec(&items).unwrap();
        let canonical = serde_json::to_string_pretty(&items).unwrap();
        assert!(canonical.chars().count() > TEXT_CHAR_LIMIT);

        let payload = normalize(FileKind::Json, raw).unwrap();
        let content = payload.text().unwrap();
        assert_eq!(content.chars().count(), TEXT_CHAR_LIMIT);
        assert!(canonical.starts_with(content));
    }

    #[test]
    fn unsupported_extension_never_touches_bytes() {
        let err = normalize_named("contract.docx", b"PK\x03\x04".to_vec()).unwrap_err();
        assert!(matches!(err, NormalizeError::UnsupportedFileType { .. }));
    }

    #[test]
    fn invalid_utf8_text_is_decode_error() {
        let err = normalize(FileKind::Txt, vec![b'o', b'k', 0xc3, 0x28]).unwrap_err();
        assert!(matches!(err, NormalizeError::Decode { valid_up_to: 2 }));
    }
}
