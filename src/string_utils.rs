//! UTF-8 index helpers
//!
//! egui reports cursor and selection positions as character indices, while
//! Rust strings are sliced by byte offsets. Characters such as `ё`, `ü` or
//! `🌱` take more than one byte, so every edit converts between the two
//! through the functions below before slicing.

// ─────────────────────────────────────────────────────────────────────────────
// Index Conversion
// ─────────────────────────────────────────────────────────────────────────────

/// Byte offset of the character at `char_index`.
///
/// Indices past the end clamp to `s.len()`.
pub fn char_to_byte(s: &str, char_index: usize) -> usize {
    s.char_indices()
        .nth(char_index)
        .map(|(byte, _)| byte)
        .unwrap_or(s.len())
}

/// Number of characters that precede `byte_index`.
///
/// A byte index inside a multi-byte character counts that character as
/// preceding it.
pub fn byte_to_char(s: &str, byte_index: usize) -> usize {
    s.char_indices()
        .take_while(|(byte, _)| *byte < byte_index)
        .count()
}

/// Convert a character index to a 0-based (line, column) pair.
pub fn char_index_to_line_col(s: &str, char_index: usize) -> (usize, usize) {
    let mut line = 0;
    let mut col = 0;
    for (i, ch) in s.chars().enumerate() {
        if i >= char_index {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

// ─────────────────────────────────────────────────────────────────────────────
// Line Helpers
// ─────────────────────────────────────────────────────────────────────────────

/// Byte range of the line that contains `byte_index`, without its newline.
pub fn line_bounds(s: &str, byte_index: usize) -> (usize, usize) {
    let index = byte_index.min(s.len());
    let start = s[..index].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = s[index..]
        .find('\n')
        .map(|i| index + i)
        .unwrap_or(s.len());
    (start, end)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_byte_ascii() {
        assert_eq!(char_to_byte("hello", 0), 0);
        assert_eq!(char_to_byte("hello", 3), 3);
        assert_eq!(char_to_byte("hello", 99), 5);
    }

    #[test]
    fn test_char_to_byte_multibyte() {
        let s = "мята";
        assert_eq!(char_to_byte(s, 1), 2);
        assert_eq!(char_to_byte(s, 4), 8);
        assert_eq!(char_to_byte("🌱a", 1), 4);
    }

    #[test]
    fn test_byte_to_char() {
        let s = "мята";
        assert_eq!(byte_to_char(s, 0), 0);
        assert_eq!(byte_to_char(s, 2), 1);
        assert_eq!(byte_to_char(s, 8), 4);
        assert_eq!(byte_to_char(s, 3), 2);
    }

    #[test]
    fn test_conversion_round_trip() {
        let s = "Полив: 🌱 weekly";
        for i in 0..=s.chars().count() {
            assert_eq!(byte_to_char(s, char_to_byte(s, i)), i);
        }
    }

    #[test]
    fn test_char_index_to_line_col() {
        let s = "ab\ncd\n";
        assert_eq!(char_index_to_line_col(s, 0), (0, 0));
        assert_eq!(char_index_to_line_col(s, 2), (0, 2));
        assert_eq!(char_index_to_line_col(s, 3), (1, 0));
        assert_eq!(char_index_to_line_col(s, 6), (2, 0));
    }

    #[test]
    fn test_line_bounds() {
        let s = "one\ntwo\nthree";
        assert_eq!(line_bounds(s, 0), (0, 3));
        assert_eq!(line_bounds(s, 5), (4, 7));
        assert_eq!(line_bounds(s, 4), (4, 7));
        assert_eq!(line_bounds(s, s.len()), (8, 13));
        assert_eq!(line_bounds("", 0), (0, 0));
        assert_eq!(line_bounds("a\n", 2), (2, 2));
    }
}
