use std::io::{self, Write};

use crate::error::{INFALLIBLE_STR, Result};
use crate::fill::Fill;
use crate::units::{Unit, UnitScanner};

/// Prefixes every line with indentation.
///
/// Indentation is emitted before the first byte of each line, outside the
/// active style.
#[derive(Debug)]
pub struct Indent<W: Write = Vec<u8>> {
    out: W,
    scanner: UnitScanner,
    indent: usize,
    fill: Fill,
    at_line_start: bool,
}

impl Indent {
    pub fn new(indent: usize) -> Self {
        Self::with_sink(indent, Vec::new())
    }

    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.finish()?)?)
    }
}

impl<W: Write> Indent<W> {
    pub fn with_sink(indent: usize, out: W) -> Self {
        Self {
            out,
            scanner: UnitScanner::default(),
            indent,
            fill: Fill::default(),
            at_line_start: true,
        }
    }

    #[must_use]
    pub fn with_fill(mut self, fill: impl Into<Fill>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            for unit in self.scanner.push(byte) {
                self.step(unit)?;
            }
        }
        Ok(())
    }

    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    pub fn finish(mut self) -> Result<W> {
        for unit in self.scanner.flush() {
            self.step(unit)?;
        }
        Ok(self.out)
    }

    fn step(&mut self, unit: Unit) -> io::Result<()> {
        if self.at_line_start && self.indent > 0 {
            let tracker = self.scanner.tracker();
            tracker.write_neutralize(&mut self.out)?;
            self.fill.emit(&mut self.out, self.indent)?;
            tracker.write_restore(&mut self.out)?;
        }
        self.at_line_start = unit.printing && unit.char() == '\n';
        self.out.write_all(unit.bytes())
    }
}

impl<W: Write> Write for Indent<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Indent every line of `text` by `indent` spaces.
pub fn indent_str(text: &str, indent: usize) -> String {
    let mut writer = Indent::new(indent);
    writer
        .write_str(text)
        .and_then(|()| writer.into_string())
        .expect(INFALLIBLE_STR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_lines() {
        assert_eq!(indent_str("foobar", 0), "foobar");
        assert_eq!(indent_str("foobar", 4), "    foobar");
        assert_eq!(indent_str("foo\nbar", 4), "    foo\n    bar");
        assert_eq!(indent_str("foo\n", 2), "  foo\n");
        assert_eq!(indent_str("", 2), "");
    }

    #[test]
    fn custom_fill() {
        let mut writer = Indent::new(4).with_fill(Fill::with(|w| w.write_all(b"-")));
        writer.write_str("foo\nbar").unwrap();
        assert_eq!(writer.into_string().unwrap(), "----foo\n----bar");
    }

    #[test]
    fn styled_lines() {
        assert_eq!(
            indent_str("\x1B[38;2;249;38;114mfoo", 4),
            "    \x1B[38;2;249;38;114mfoo"
        );
        assert_eq!(
            indent_str("\x1B[38;2;249;38;114mfoo\nbar", 4),
            "    \x1B[38;2;249;38;114mfoo\n\x1b[0m    \x1B[38;2;249;38;114mbar"
        );
    }

    #[test]
    fn newline_inside_hyperlink_is_not_a_line_break() {
        assert_eq!(
            indent_str("\x1B]8;;https://gith\nub.com\x07foo\nbar", 4),
            "    \x1B]8;;https://gith\nub.com\x07foo\n\x1b]8;;\x1b\\    \x1B]8;;https://gith\nub.com\x1b\\bar"
        );
    }

    #[test]
    fn split_writes() {
        let mut writer = Indent::new(4);
        writer.write_str("foo\n").unwrap();
        writer.write_str("bar").unwrap();
        assert_eq!(writer.into_string().unwrap(), "    foo\n    bar");
    }
}
