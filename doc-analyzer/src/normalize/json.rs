use serde_json::Value;

use crate::{errors::NormalizeError, file_kind::FileKind, normalize::text::truncate_chars};

/// Parses JSON and re-serializes it with 2-space indentation, then truncates
/// to `limit` characters.
///
/// Object keys come out sorted, so the same document always yields the same
/// excerpt regardless of the source's key order or whitespace. Numbers keep
/// their source digits (`arbitrary_precision`), so big integers and long
/// decimals are not rounded through `f64`.
///
/// # Errors
/// [`NormalizeError::Parse`] with serde's line/column message.
pub fn normalize_json(bytes: &[u8], limit: usize) -> Result<String, NormalizeError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| NormalizeError::parse(FileKind::Json, e))?;
    let pretty =
        serde_json::to_string_pretty(&value).map_err(|e| NormalizeError::parse(FileKind::Json, e))?;
    Ok(truncate_chars(&pretty, limit).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_reparses_to_the_same_document() {
        let raw = br#"{ "zeta": [1, 2, {"b": null, "a": true}], "alpha": "x\u00e9" }"#;
        let out = normalize_json(raw, 15_000).unwrap();
        let reparsed: Value = serde_json::from_str(&out).unwrap();
        let original: Value = serde_json::from_slice(raw).unwrap();
        assert_eq!(reparsed, original);
    }

    #[test]
    fn numbers_keep_their_digits() {
        let raw = br#"{"rate": 0.10000000000000000001, "account": 123456789012345678901234567890}"#;
        let out = normalize_json(raw, 15_000).unwrap();
        assert_eq!(
            out,
            "{\n  \"account\": 123456789012345678901234567890,\n  \"rate\": 0.10000000000000000001\n}"
        );
    }

    #[test]
    fn keys_sorted_and_two_space_indent() {
        let out = normalize_json(br#"{"b":1,"a":{"c":2}}"#, 15_000).unwrap();
        assert_eq!(out, "{\n  \"a\": {\n    \"c\": 2\n  },\n  \"b\": 1\n}");
        // whitespace differences in the source do not change the excerpt
        let spaced = normalize_json(b"{ \"a\" : { \"c\" : 2 } ,\n \"b\" : 1 }", 15_000).unwrap();
        assert_eq!(out, spaced);
    }

    #[test]
    fn scalar_documents_are_allowed() {
        assert_eq!(normalize_json(b"42", 10).unwrap(), "42");
        assert_eq!(normalize_json(b"\"hi\"", 10).unwrap(), "\"hi\"");
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = normalize_json(b"{\"a\": }", 100).unwrap_err();
        match err {
            NormalizeError::Parse { kind, message } => {
                assert_eq!(kind, FileKind::Json);
                assert!(message.contains("line 1"), "{message}");
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(normalize_json(b"", 100).is_err());
    }
}
