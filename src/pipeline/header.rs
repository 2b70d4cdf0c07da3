//! Header boundary insertion.
//!
//! Block extraction loses the punctuation that separates a title from the
//! paragraph below it. A short block that starts with a capital letter and
//! has no terminal mark is treated as a header and closed with a period, so
//! it cannot fuse with the following block during segmentation.
//!
//! The rule is a heuristic: a short capitalized sentence without final
//! punctuation also gets a period, and a header of 100 characters or more is
//! left alone.

use std::borrow::Cow;

/// Marks that already terminate a header.
const TERMINAL_MARKS: [char; 5] = ['.', '!', ':', ';', '?'];

/// Check whether trimmed block text looks like a header.
pub fn is_header_like(text: &str, max_chars: usize) -> bool {
    match text.chars().next() {
        Some(first) => first.is_uppercase() && text.chars().count() < max_chars,
        None => false,
    }
}

/// Close a header-like block with a period.
///
/// Returns the trimmed content plus `.` when the block is header-like and
/// unterminated, and the content untouched otherwise.
pub fn insert_header_boundary(content: &str, max_chars: usize) -> Cow<'_, str> {
    let trimmed = content.trim();
    if !is_header_like(trimmed, max_chars) || ends_with_hyphen_break(trimmed) {
        return Cow::Borrowed(content);
    }

    match trimmed.chars().last() {
        Some(last) if TERMINAL_MARKS.contains(&last) => Cow::Borrowed(content),
        _ => {
            let mut closed = String::with_capacity(trimmed.len() + 1);
            closed.push_str(trimmed);
            closed.push('.');
            Cow::Owned(closed)
        }
    }
}

/// `word-` at the end of a block continues into the next block.
fn ends_with_hyphen_break(text: &str) -> bool {
    let mut rev = text.chars().rev();
    matches!(
        (rev.next(), rev.next()),
        (Some('-'), Some(c)) if c.is_alphanumeric() || c == '_'
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::HEADER_MAX_CHARS;

    #[test]
    fn test_header_gets_period() {
        assert_eq!(insert_header_boundary("Results", HEADER_MAX_CHARS), "Results.");
        assert_eq!(
            insert_header_boundary("  Meeting Minutes \n", HEADER_MAX_CHARS),
            "Meeting Minutes."
        );
    }

    #[test]
    fn test_terminated_header_unchanged() {
        for text in ["Results.", "Results!", "Results:", "Results;", "Results?"] {
            assert!(matches!(
                insert_header_boundary(text, HEADER_MAX_CHARS),
                Cow::Borrowed(t) if t == text
            ));
        }
    }

    #[test]
    fn test_lowercase_block_unchanged() {
        let text = "the system performed well";
        assert_eq!(insert_header_boundary(text, HEADER_MAX_CHARS), text);
    }

    #[test]
    fn test_long_block_unchanged() {
        let text = format!("A{}", "b".repeat(99));
        assert_eq!(text.chars().count(), 100);
        assert_eq!(insert_header_boundary(&text, HEADER_MAX_CHARS), text);

        let text = format!("A{}", "b".repeat(98));
        assert_eq!(
            insert_header_boundary(&text, HEADER_MAX_CHARS),
            format!("{}.", text)
        );
    }

    #[test]
    fn test_empty_and_whitespace_unchanged() {
        assert_eq!(insert_header_boundary("", HEADER_MAX_CHARS), "");
        assert_eq!(insert_header_boundary("  \n", HEADER_MAX_CHARS), "  \n");
    }

    #[test]
    fn test_digit_start_is_not_header() {
        assert_eq!(insert_header_boundary("2 Methods", HEADER_MAX_CHARS), "2 Methods");
    }

    #[test]
    fn test_short_capitalized_sentence_gets_period() {
        assert_eq!(
            insert_header_boundary("WE MET ON MONDAY", HEADER_MAX_CHARS),
            "WE MET ON MONDAY."
        );
    }

    #[test]
    fn test_hyphen_continuation_unchanged() {
        let text = "This is a config-";
        assert_eq!(insert_header_boundary(text, HEADER_MAX_CHARS), text);
    }

    #[test]
    fn test_non_ascii_uppercase() {
        assert_eq!(insert_header_boundary("Ølbryggeri", HEADER_MAX_CHARS), "Ølbryggeri.");
    }
}
