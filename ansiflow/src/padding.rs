use std::io::{self, Write};

use ansiflow_vte::char_width;

use crate::error::{INFALLIBLE_STR, Result};
use crate::fill::Fill;
use crate::units::{Unit, UnitScanner};

/// Pads every line to a minimum printable width.
///
/// The padding is written outside the active style: the style is
/// neutralized before the fill and restored after it.
#[derive(Debug)]
pub struct Pad<W: Write = Vec<u8>> {
    out: W,
    scanner: UnitScanner,
    width: usize,
    fill: Fill,
    line_len: usize,
}

impl Pad {
    pub fn new(width: usize) -> Self {
        Self::with_sink(width, Vec::new())
    }

    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.finish()?)?)
    }
}

impl<W: Write> Pad<W> {
    pub fn with_sink(width: usize, out: W) -> Self {
        Self {
            out,
            scanner: UnitScanner::default(),
            width,
            fill: Fill::default(),
            line_len: 0,
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

    /// Pad the last line if it has content.
    pub fn close(&mut self) -> Result<()> {
        for unit in self.scanner.flush() {
            self.step(unit)?;
        }
        if self.line_len != 0 {
            self.pad_line()?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        Ok(self.out)
    }

    fn step(&mut self, unit: Unit) -> io::Result<()> {
        if unit.printing {
            if unit.char() == '\n' {
                self.pad_line()?;
            } else {
                self.line_len += char_width(unit.char());
            }
        }
        self.out.write_all(unit.bytes())
    }

    fn pad_line(&mut self) -> io::Result<()> {
        if self.width > 0 && self.line_len < self.width {
            let tracker = self.scanner.tracker();
            tracker.write_neutralize(&mut self.out)?;
            self.fill.emit(&mut self.out, self.width - self.line_len)?;
            tracker.write_restore(&mut self.out)?;
        }
        self.line_len = 0;
        Ok(())
    }
}

impl<W: Write> Write for Pad<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Pad every line of `text` to `width` cells with spaces.
pub fn pad_str(text: &str, width: usize) -> String {
    let mut pad = Pad::new(width);
    pad.write_str(text)
        .and_then(|()| pad.into_string())
        .expect(INFALLIBLE_STR)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_each_line() {
        assert_eq!(pad_str("foo", 6), "foo   ");
        assert_eq!(pad_str("foo\nbar", 5), "foo  \nbar  ");
        assert_eq!(pad_str("foobar", 3), "foobar");
        assert_eq!(pad_str("foo", 0), "foo");
    }

    #[test]
    fn trailing_newline_leaves_empty_line() {
        assert_eq!(pad_str("foo\n", 4), "foo \n");
    }

    #[test]
    fn wide_characters_count_twice() {
        assert_eq!(pad_str("日本", 6), "日本  ");
    }

    #[test]
    fn fill_steps_outside_style() {
        assert_eq!(
            pad_str("\x1b[31mab\ncd", 3),
            "\x1b[31mab\x1b[0m \x1b[31m\ncd\x1b[0m \x1b[31m"
        );
        assert_eq!(
            pad_str("\x1b[31mfoo\x1b[0m\nx", 4),
            "\x1b[31mfoo\x1b[0m \nx   "
        );
    }

    #[test]
    fn custom_fill() {
        let mut pad = Pad::new(5).with_fill(Fill::with(|w| w.write_all(b".")));
        pad.write_str("ab\nc").unwrap();
        assert_eq!(pad.into_string().unwrap(), "ab...\nc....");

        let mut pad = Pad::new(4).with_fill('-');
        pad.write_str("x").unwrap();
        assert_eq!(pad.into_string().unwrap(), "x---");
    }
}
