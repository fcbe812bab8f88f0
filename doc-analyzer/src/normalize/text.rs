use crate::errors::NormalizeError;

/// Strict UTF-8 decode; no lossy replacement.
///
/// # Errors
/// [`NormalizeError::Decode`] with the offset of the first invalid byte.
pub fn decode_text(bytes: &[u8]) -> Result<&str, NormalizeError> {
    std::str::from_utf8(bytes).map_err(|e| NormalizeError::Decode {
        valid_up_to: e.valid_up_to(),
    })
}

/// First `limit` characters (Unicode scalar values) of `s`.
///
/// Cuts on a char boundary, so a multi-byte character is never split. Not
/// grapheme-aware: a combining sequence may lose its tail.
pub fn truncate_chars(s: &str, limit: usize) -> &str {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 2), "hé");
        assert_eq!(truncate_chars(s, 100), s);
        assert_eq!(truncate_chars("", 5), "");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn multibyte_text_is_kept_whole() {
        let s = "日本語のテキスト".repeat(3_000);
        let cut = truncate_chars(&s, 15_000);
        assert_eq!(cut.chars().count(), 15_000);
        assert!(s.starts_with(cut));
    }

    #[test]
    fn bom_is_preserved() {
        assert_eq!(decode_text(b"\xef\xbb\xbfhi").unwrap(), "\u{feff}hi");
    }
}
