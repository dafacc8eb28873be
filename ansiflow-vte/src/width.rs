//! Printable cell width of escape-laden text.

use unicode_width::UnicodeWidthChar;

use crate::machine::{StateMachine, StateTransition};
use crate::utf8::Utf8Decoder;

/// Terminal cell width of a single codepoint: 0 for controls and zero-width
/// marks, 1 for narrow and 2 for wide characters.
#[inline]
pub fn char_width(c: char) -> usize {
    if (c as u32) < 0x20 || (0x7f..0xa0).contains(&(c as u32)) {
        return 0;
    }
    c.width().unwrap_or(0)
}

/// Sum of the cell widths of the printable codepoints in `text`.
#[inline]
pub fn printable_width(text: &str) -> usize {
    printable_width_bytes(text.as_bytes())
}

/// Byte overload of [`printable_width`]; identical results for
/// `text.as_bytes()`.
pub fn printable_width_bytes(bytes: &[u8]) -> usize {
    let mut width = 0;
    scan(bytes, |cp_char, _, transition| {
        if transition.is_printing() {
            width += char_width(cp_char);
        }
    });
    width
}

/// Copy of `bytes` without any escape-sequence bytes.
pub fn strip(bytes: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    scan(bytes, |_, raw, transition| {
        if transition.is_printing() {
            out.extend_from_slice(raw);
        }
    });
    out
}

/// Walk `bytes` codepoint by codepoint, reporting the transition caused by
/// the last byte of each codepoint.
fn scan(bytes: &[u8], mut f: impl FnMut(char, &[u8], StateTransition)) {
    let mut machine = StateMachine::new();
    let mut decoder = Utf8Decoder::new();
    let mut last = StateTransition::default();

    for &byte in bytes {
        let stale = last;
        last = machine.next(byte);
        let decoded = decoder.push(byte);
        for cp in decoded.abandoned() {
            f(cp.char(), cp.as_bytes(), stale);
        }
        if let Some(cp) = decoded.complete() {
            f(cp.char(), cp.as_bytes(), last);
        }
    }
    for cp in decoder.flush().abandoned() {
        f(cp.char(), cp.as_bytes(), last);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styled_text() {
        assert_eq!(printable_width("\x1B[38;2;249;38;114mfoo"), 3);
        assert_eq!(printable_width("\x1b[1mbold\x1b[0m plain"), 10);
    }

    #[test]
    fn wide_and_zero_width() {
        assert_eq!(printable_width("日本"), 4);
        assert_eq!(printable_width("e\u{301}"), 1);
        assert_eq!(printable_width("a\tb"), 2);
    }

    #[test]
    fn hyperlink_bytes_are_not_printable() {
        let text = "\x1b]8;;http://example.com\x07link\x1b]8;;\x1b\\";
        assert_eq!(printable_width(text), 4);
        assert_eq!(strip(text.as_bytes()), b"link".to_vec());
    }

    #[test]
    fn bytes_match_str() {
        for text in ["", "plain", "\x1b[31m日本\x1b[0m", "\x1b(0x\x1bMy"] {
            assert_eq!(printable_width(text), printable_width_bytes(text.as_bytes()));
        }
    }

    #[test]
    fn broken_utf8_counts_every_byte() {
        assert_eq!(printable_width_bytes(b"\xe2a"), 2);
        assert_eq!(printable_width_bytes(b"\xe2\x82"), 2);
        assert_eq!(strip(b"\xe2\x1b[1ma"), b"\xe2a".to_vec());
    }

    #[test]
    fn unknown_sequences_are_stripped() {
        assert_eq!(strip(b"a\x1b(0Bb"), b"ab".to_vec());
        assert_eq!(printable_width("a\x1b(0Bb"), 2);
    }
}
