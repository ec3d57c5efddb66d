//! Utility functions.

use std::cmp::min; // comparison helpers

/// Convert a "character index" to a "byte index" in a UTF‑8 string.
///
/// Rust strings are UTF‑8, so `s[a..b]` is only valid when `a` and `b` are **byte offsets**
/// that lie on UTF‑8 character boundaries.
pub fn char_to_byte_index(s: &str, char_idx: usize) -> usize {
    s.char_indices().nth(char_idx).map_or(s.len(), |(bi, _)| bi)
}

/// Convert a byte offset back into a character index.
pub fn byte_to_char_index(s: &str, byte_idx: usize) -> usize {
    s[..min(byte_idx, s.len())].chars().count()
}

/// Number of decimal digits in `n` (used to size the line-number gutter).
pub fn digits(n: usize) -> usize {
    n.to_string().len()
}

/// Length of a line in characters.
pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== char_to_byte_index tests ====================

    #[test]
    fn char_to_byte_ascii() {
        let s = "hello";
        assert_eq!(char_to_byte_index(s, 0), 0);
        assert_eq!(char_to_byte_index(s, 1), 1);
        assert_eq!(char_to_byte_index(s, 5), 5);
    }

    #[test]
    fn char_to_byte_unicode() {
        // 'é' is 2 bytes in UTF-8
        let s = "héllo";
        assert_eq!(char_to_byte_index(s, 1), 1);
        assert_eq!(char_to_byte_index(s, 2), 3);
        assert_eq!(char_to_byte_index(s, 4), 5);
    }

    #[test]
    fn char_to_byte_beyond_end() {
        assert_eq!(char_to_byte_index("abc", 10), 3);
        assert_eq!(char_to_byte_index("", 5), 0);
    }

    // ==================== byte_to_char_index tests ====================

    #[test]
    fn byte_to_char_unicode() {
        let s = "héllo";
        assert_eq!(byte_to_char_index(s, 1), 1);
        assert_eq!(byte_to_char_index(s, 3), 2);
        assert_eq!(byte_to_char_index(s, 100), 5);
    }

    // ==================== other utils tests ====================

    #[test]
    fn test_digits() {
        assert_eq!(digits(0), 1);
        assert_eq!(digits(9), 1);
        assert_eq!(digits(10), 2);
        assert_eq!(digits(1000), 4);
    }

    #[test]
    fn test_char_len() {
        assert_eq!(char_len(""), 0);
        assert_eq!(char_len("日本語"), 3);
    }
}
