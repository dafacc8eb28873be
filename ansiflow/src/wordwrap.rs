//! Word wrapping: lines break between words, at whitespace or after a
//! breakpoint codepoint.
//!
//! A word wider than the limit is never split; it overflows its line.
//! Escape sequences travel with the word they are adjacent to.

use std::io::{self, Write};

use ansiflow_vte::char_width;
use log::trace;

use crate::error::{INFALLIBLE_BYTES, INFALLIBLE_STR, Result};
use crate::fill::Fill;
use crate::layout::{LineCounter, LineSink, Lines, SinkResult};
use crate::units::{Unit, UnitScanner};

/// Configuration of a word wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WordWrapOptions {
    /// Maximum printable width of a line. `0` disables wrapping.
    pub limit: usize,
    /// Codepoints after which a line may break.
    pub breakpoints: Vec<char>,
    /// Codepoints treated as newlines.
    pub newlines: Vec<char>,
    /// Emit input newlines. When unset they are folded into spaces.
    pub keep_newlines: bool,
    /// Neutralize the active style before every line break and restore it
    /// after.
    pub break_ansi: bool,
}

impl Default for WordWrapOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            breakpoints: vec!['-'],
            newlines: vec!['\n'],
            keep_newlines: true,
            break_ansi: false,
        }
    }
}

impl WordWrapOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn breakpoints(mut self, breakpoints: impl Into<Vec<char>>) -> Self {
        self.breakpoints = breakpoints.into();
        self
    }

    #[must_use]
    pub fn newlines(mut self, newlines: impl Into<Vec<char>>) -> Self {
        self.newlines = newlines.into();
        self
    }

    #[must_use]
    pub fn keep_newlines(mut self, keep: bool) -> Self {
        self.keep_newlines = keep;
        self
    }

    #[must_use]
    pub fn break_ansi(mut self, break_ansi: bool) -> Self {
        self.break_ansi = break_ansi;
        self
    }
}

#[derive(Debug)]
struct WordWrapper<S> {
    options: WordWrapOptions,
    scanner: UnitScanner,
    line_len: usize,
    space_width: usize,
    word_len: usize,
    word_width: usize,
    sink: S,
}

impl<S: LineSink> WordWrapper<S> {
    fn new(options: WordWrapOptions, sink: S) -> Self {
        Self {
            options,
            scanner: UnitScanner::default(),
            line_len: 0,
            space_width: 0,
            word_len: 0,
            word_width: 0,
            sink,
        }
    }

    fn feed(&mut self, bytes: &[u8]) -> SinkResult<S> {
        for &byte in bytes {
            for unit in self.scanner.push(byte) {
                self.step(unit)?;
            }
        }
        Ok(())
    }

    /// Commit the pending word. Trailing whitespace is dropped.
    fn close(&mut self) -> SinkResult<S> {
        for unit in self.scanner.flush() {
            self.step(unit)?;
        }
        self.add_word()
    }

    fn step(&mut self, unit: Unit) -> SinkResult<S> {
        if self.options.limit == 0 {
            return if unit.is_printing_in(&self.options.newlines) {
                self.sink.newline(unit.bytes())
            } else {
                self.sink.text(unit.bytes())
            };
        }

        if !unit.printing {
            self.stage_word(unit.bytes());
            return Ok(());
        }

        let c = unit.char();
        if !self.options.keep_newlines && self.options.newlines.contains(&c) {
            self.step_printable(' ', b" ")
        } else {
            self.step_printable(c, unit.bytes())
        }
    }

    fn step_printable(&mut self, c: char, bytes: &[u8]) -> SinkResult<S> {
        if self.options.newlines.contains(&c) {
            if self.word_len == 0 {
                // Whitespace before a newline survives if it fits.
                if self.line_len + self.space_width <= self.options.limit {
                    self.sink.commit_space()?;
                }
                self.space_width = 0;
                self.sink.discard_space();
            }
            self.add_word()?;
            self.add_new_line()
        } else if c.is_whitespace() {
            self.add_word()?;
            // Pending whitespace is measured in bytes.
            self.space_width += bytes.len();
            self.sink.stage_space(bytes);
            Ok(())
        } else if self.options.breakpoints.contains(&c) {
            // Breakpoints go straight to the line without taking up width.
            self.add_space()?;
            self.add_word()?;
            self.sink.text(bytes)
        } else {
            self.stage_word(bytes);
            self.word_width += char_width(c);

            let limit = self.options.limit;
            if self.line_len + self.space_width + self.word_width > limit
                && self.word_width < limit
            {
                self.add_new_line()?;
            }
            Ok(())
        }
    }

    fn stage_word(&mut self, bytes: &[u8]) {
        self.word_len += bytes.len();
        self.sink.stage_word(bytes);
    }

    // Counters only move after the sink accepted the commit.
    fn add_space(&mut self) -> SinkResult<S> {
        self.sink.commit_space()?;
        self.line_len += self.space_width;
        self.space_width = 0;
        Ok(())
    }

    fn add_word(&mut self) -> SinkResult<S> {
        if self.word_len == 0 {
            return Ok(());
        }

        self.add_space()?;
        self.sink.commit_word()?;
        self.line_len += self.word_width;
        self.word_len = 0;
        self.word_width = 0;
        Ok(())
    }

    fn add_new_line(&mut self) -> SinkResult<S> {
        trace!("word wrap line break after {} cells", self.line_len);
        let ansi = self.options.break_ansi.then_some(self.scanner.tracker());
        self.sink.line_break(b"\n", ansi)?;
        self.line_len = 0;
        self.space_width = 0;
        self.sink.discard_space();
        Ok(())
    }
}

/// Streaming word wrapper writing into `W`.
///
/// Call [`WordWrap::close`] (or [`WordWrap::finish`]) before reading the
/// result: the last word is only committed then.
#[derive(Debug)]
pub struct WordWrap<W: Write = Vec<u8>> {
    engine: WordWrapper<Lines<W>>,
}

impl WordWrap {
    pub fn new(options: WordWrapOptions) -> Self {
        Self::with_sink(options, Vec::new())
    }

    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.finish()?)?)
    }
}

impl<W: Write> WordWrap<W> {
    pub fn with_sink(options: WordWrapOptions, sink: W) -> Self {
        Self {
            engine: WordWrapper::new(options, Lines::new(sink)),
        }
    }

    /// Emit `units` fill units after every line break, e.g. for a hanging
    /// indent. The fill is written outside the restored style.
    #[must_use]
    pub fn with_break_fill(mut self, fill: impl Into<Fill>, units: usize) -> Self {
        self.engine.sink.set_break_fill(fill.into(), units);
        self
    }

    pub fn options(&self) -> &WordWrapOptions {
        &self.engine.options
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        Ok(self.engine.feed(bytes)?)
    }

    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Commit the pending word into the sink.
    pub fn close(&mut self) -> Result<()> {
        Ok(self.engine.close()?)
    }

    /// Close and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        Ok(self.engine.sink.into_inner())
    }
}

impl<W: Write> Write for WordWrap<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.engine.sink.get_mut().flush()
    }
}

/// Number of lines a [`WordWrap`] with the same options would produce.
#[derive(Debug)]
pub struct WordWrapHeight {
    engine: WordWrapper<LineCounter>,
}

impl WordWrapHeight {
    pub fn new(options: WordWrapOptions) -> Self {
        Self {
            engine: WordWrapper::new(options, LineCounter::default()),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let Ok(()) = self.engine.feed(bytes);
    }

    pub fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    pub fn height(&mut self) -> usize {
        let Ok(()) = self.engine.close();
        self.engine.sink.breaks() + 1
    }
}

/// Word-wrap `text` at `limit` cells with default options.
pub fn word_wrap_str(text: &str, limit: usize) -> String {
    let mut wrap = WordWrap::new(WordWrapOptions::new(limit));
    wrap.write_str(text)
        .and_then(|()| wrap.into_string())
        .expect(INFALLIBLE_STR)
}

pub fn word_wrap_bytes(bytes: &[u8], limit: usize) -> Vec<u8> {
    let mut wrap = WordWrap::new(WordWrapOptions::new(limit));
    wrap.write_bytes(bytes)
        .and_then(|()| wrap.finish())
        .expect(INFALLIBLE_BYTES)
}

/// Line count of [`word_wrap_str`] for the same input.
pub fn height(text: &str, limit: usize) -> usize {
    let mut height = WordWrapHeight::new(WordWrapOptions::new(limit));
    height.write_str(text);
    height.height()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Case {
        input: &'static str,
        expected: &'static str,
        options: WordWrapOptions,
    }

    fn cases() -> Vec<Case> {
        vec![
            Case {
                input: "",
                expected: "",
                options: WordWrapOptions::new(4),
            },
            Case {
                input: "foobar",
                expected: "foobar",
                options: WordWrapOptions::new(0),
            },
            Case {
                input: "foo bar",
                expected: "foo\nbar",
                options: WordWrapOptions::new(3),
            },
            Case {
                input: "Hello World!",
                expected: "Hello\nWorld!",
                options: WordWrapOptions::new(5),
            },
            Case {
                input: "foobarfoo",
                expected: "foobarfoo",
                options: WordWrapOptions::new(4),
            },
            Case {
                input: "foo-foobar",
                expected: "foo-\nfoobar",
                options: WordWrapOptions::new(4),
            },
            Case {
                input: "foo bar\nbaz",
                expected: "foo\nbar\nbaz",
                options: WordWrapOptions::new(3),
            },
            Case {
                input: "foo bar\nbaz",
                expected: "foo bar baz",
                options: WordWrapOptions::new(11).keep_newlines(false),
            },
            Case {
                input: "foo  \nbar",
                expected: "foo  \nbar",
                options: WordWrapOptions::new(10),
            },
            Case {
                input: "foo  \nbar",
                expected: "foo\nbar",
                options: WordWrapOptions::new(4),
            },
            Case {
                input: "foo bar  ",
                expected: "foo bar",
                options: WordWrapOptions::new(10),
            },
            Case {
                input: "a-bc",
                expected: "a-bc",
                options: WordWrapOptions::new(3),
            },
            Case {
                input: "foo\u{a0}ba",
                expected: "foo\nba",
                options: WordWrapOptions::new(6),
            },
            Case {
                input: "foo|bar baz",
                expected: "foo|\nbar\nbaz",
                options: WordWrapOptions::new(4).breakpoints(['|']),
            },
            Case {
                input: "\x1B[38;2;249;38;114mfoo\nbar",
                expected: "\x1B[38;2;249;38;114mfoo\nbar",
                options: WordWrapOptions::new(10),
            },
            Case {
                input: "\x1B[38;2;249;38;114mfoo\nbar",
                expected: "\x1B[38;2;249;38;114mfoo\x1b[0m\n\x1B[38;2;249;38;114mbar",
                options: WordWrapOptions::new(10).break_ansi(true),
            },
            Case {
                input: "\x1B[31mfoo bar\x1B[0m",
                expected: "\x1B[31mfoo\x1b[0m\n\x1B[31mbar\x1B[0m",
                options: WordWrapOptions::new(3).break_ansi(true),
            },
            Case {
                input: "日本 語",
                expected: "日本\n語",
                options: WordWrapOptions::new(4),
            },
        ]
    }

    #[test]
    fn word_wraps_cases() {
        for case in cases() {
            let mut wrap = WordWrap::new(case.options.clone());
            wrap.write_str(case.input).unwrap();
            assert_eq!(
                wrap.into_string().unwrap(),
                case.expected,
                "input {:?} with {:?}",
                case.input,
                case.options
            );
        }
    }

    #[test]
    fn height_matches_cases() {
        for case in cases() {
            let mut height = WordWrapHeight::new(case.options.clone());
            height.write_str(case.input);
            let expected = ansiflow_vte::strip(case.expected.as_bytes())
                .iter()
                .filter(|&&b| b == b'\n')
                .count()
                + 1;
            assert_eq!(height.height(), expected, "input {:?}", case.input);
        }
    }

    #[test]
    fn break_fill_after_every_break() {
        let mut wrap = WordWrap::new(WordWrapOptions::new(3))
            .with_break_fill(Fill::with(|w| w.write_all(b"..")), 1);
        wrap.write_str("foo bar").unwrap();
        assert_eq!(wrap.into_string().unwrap(), "foo\n..bar");

        let mut wrap =
            WordWrap::new(WordWrapOptions::new(3).break_ansi(true)).with_break_fill('>', 2);
        wrap.write_str("\x1b[1mfoo bar").unwrap();
        assert_eq!(
            wrap.into_string().unwrap(),
            "\x1b[1mfoo\x1b[0m\n>>\x1b[1mbar"
        );
    }

    #[test]
    fn pending_word_needs_close() {
        let mut wrap = WordWrap::with_sink(WordWrapOptions::new(10), Vec::new());
        wrap.write_str("foo bar").unwrap();
        wrap.close().unwrap();
        assert_eq!(wrap.finish().unwrap(), b"foo bar".to_vec());
    }

    struct Closed;

    impl Write for Closed {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn failed_commit_keeps_pending_word() {
        let mut wrap = WordWrap::with_sink(WordWrapOptions::new(10), Closed);
        assert!(matches!(wrap.write_str("abc def"), Err(crate::Error::Sink(_))));
        assert_eq!(wrap.engine.word_len, 3);
        assert!(matches!(wrap.close(), Err(crate::Error::Sink(_))));
        assert_eq!(wrap.engine.word_len, 3);
    }

    #[test]
    fn convenience_functions() {
        assert_eq!(word_wrap_str("foo bar", 3), "foo\nbar");
        assert_eq!(word_wrap_bytes(b"foo bar", 3), b"foo\nbar".to_vec());
        assert_eq!(height("foo bar baz", 3), 3);
        assert_eq!(height("", 3), 1);
    }
}
