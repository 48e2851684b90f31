//! Filename sanitization for transcript output files

use std::sync::OnceLock;

use regex::Regex;

/// Maximum length of the sanitized title component, in characters.
const MAX_TITLE_LEN: usize = 50;

fn reserved_chars() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Filesystem-reserved characters on common platforms.
    RE.get_or_init(|| Regex::new(r#"[\\/*?:"<>|]"#).expect("invalid sanitizer regex"))
}

/// Map arbitrary title text to a filesystem-safe, length-bounded string.
///
/// Reserved characters are removed, spaces become underscores, and the
/// result is truncated to its first 50 characters. Truncation counts
/// characters rather than bytes so multi-byte titles are never split
/// inside a UTF-8 sequence.
pub fn sanitize_filename(text: &str) -> String {
    let cleaned = reserved_chars().replace_all(text, "");
    let cleaned = cleaned.replace(' ', "_");
    cleaned.chars().take(MAX_TITLE_LEN).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_reserved_characters() {
        let out = sanitize_filename(r#"a\b/c*d?e:f"g<h>i|j"#);
        assert_eq!(out, "abcdefghij");
        for c in ['\\', '/', '*', '?', ':', '"', '<', '>', '|'] {
            assert!(!out.contains(c));
        }
    }

    #[test]
    fn test_replaces_spaces_with_underscores() {
        assert_eq!(sanitize_filename("a b"), "a_b");
        assert_eq!(sanitize_filename("a b c"), "a_b_c");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(sanitize_filename(""), "");
    }

    #[test]
    fn test_truncates_to_50_characters() {
        let long = "x".repeat(80);
        assert_eq!(sanitize_filename(&long).chars().count(), 50);
    }

    #[test]
    fn test_truncation_happens_after_substitution() {
        // 49 'a's followed by ": b": the colon is removed first, so the
        // space that follows still lands inside the 50-character window.
        let input = format!("{}: b", "a".repeat(49));
        assert_eq!(sanitize_filename(&input), format!("{}_", "a".repeat(49)));
    }

    #[test]
    fn test_multibyte_title_does_not_panic() {
        let title = "ü".repeat(60);
        let out = sanitize_filename(&title);
        assert_eq!(out.chars().count(), 50);
    }
}
