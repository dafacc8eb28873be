//! Hard wrapping at an exact cell width.
//!
//! Lines are broken strictly at the limit, even in the middle of a word.
//! Escape sequences are never split and never count toward the width.

use std::io::{self, Write};

use ansiflow_vte::char_width;
use log::trace;

use crate::error::{INFALLIBLE_BYTES, INFALLIBLE_STR, Result};
use crate::layout::{LineCounter, LineSink, Lines, SinkResult};
use crate::units::{Unit, UnitScanner};

pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Configuration of a hard wrap.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct WrapOptions {
    /// Maximum printable width of a line. `0` disables wrapping.
    pub limit: usize,
    /// Number of spaces a tab expands to.
    pub tab_width: usize,
    /// Emit input newlines. When unset they are dropped.
    pub keep_newlines: bool,
    /// Keep whitespace that would start a forced line or overflow one.
    pub preserve_space: bool,
    /// Codepoints treated as newlines.
    pub newlines: Vec<char>,
    /// Neutralize the active style before every line break and restore it
    /// after.
    pub break_ansi: bool,
}

impl Default for WrapOptions {
    fn default() -> Self {
        Self {
            limit: 0,
            tab_width: DEFAULT_TAB_WIDTH,
            keep_newlines: true,
            preserve_space: false,
            newlines: vec!['\n'],
            break_ansi: false,
        }
    }
}

impl WrapOptions {
    pub fn new(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn tab_width(mut self, tab_width: usize) -> Self {
        self.tab_width = tab_width;
        self
    }

    #[must_use]
    pub fn keep_newlines(mut self, keep: bool) -> Self {
        self.keep_newlines = keep;
        self
    }

    #[must_use]
    pub fn preserve_space(mut self, preserve: bool) -> Self {
        self.preserve_space = preserve;
        self
    }

    #[must_use]
    pub fn newlines(mut self, newlines: impl Into<Vec<char>>) -> Self {
        self.newlines = newlines.into();
        self
    }

    #[must_use]
    pub fn break_ansi(mut self, break_ansi: bool) -> Self {
        self.break_ansi = break_ansi;
        self
    }
}

/// Line-break decisions shared by [`Wrap`] and [`WrapHeight`].
#[derive(Debug)]
struct HardWrapper<S> {
    options: WrapOptions,
    scanner: UnitScanner,
    line_len: usize,
    forced: bool,
    sink: S,
}

impl<S: LineSink> HardWrapper<S> {
    fn new(options: WrapOptions, sink: S) -> Self {
        Self {
            options,
            scanner: UnitScanner::default(),
            line_len: 0,
            forced: false,
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

    fn flush(&mut self) -> SinkResult<S> {
        for unit in self.scanner.flush() {
            self.step(unit)?;
        }
        Ok(())
    }

    fn step(&mut self, unit: Unit) -> SinkResult<S> {
        if !unit.printing {
            return self.sink.text(unit.bytes());
        }

        let c = unit.char();
        let is_newline = self.options.newlines.contains(&c);

        if self.options.limit == 0 {
            return if is_newline {
                self.sink.newline(unit.bytes())
            } else {
                self.sink.text(unit.bytes())
            };
        }

        if is_newline {
            if !self.options.keep_newlines {
                return Ok(());
            }
            self.line_len = 0;
            self.forced = false;
            let ansi = self.options.break_ansi.then_some(self.scanner.tracker());
            return self.sink.line_break(unit.bytes(), ansi);
        }

        if c == '\t' {
            for _ in 0..self.options.tab_width {
                self.place(' ', b" ")?;
            }
            return Ok(());
        }

        self.place(c, unit.bytes())
    }

    fn place(&mut self, c: char, bytes: &[u8]) -> SinkResult<S> {
        let width = char_width(c);
        let limit = self.options.limit;
        let overflows = self.line_len + width > limit;

        if !self.options.preserve_space
            && c.is_whitespace()
            && ((self.line_len == 0 && self.forced) || overflows)
        {
            return Ok(());
        }

        if self.line_len > 0 && overflows {
            trace!("forced line break after {} cells", self.line_len);
            let ansi = self.options.break_ansi.then_some(self.scanner.tracker());
            self.sink.line_break(b"\n", ansi)?;
            self.line_len = 0;
            self.forced = true;
        } else {
            self.forced = false;
        }

        self.line_len += width;
        self.sink.text(bytes)
    }
}

/// Streaming hard wrapper writing into `W`.
#[derive(Debug)]
pub struct Wrap<W: Write = Vec<u8>> {
    engine: HardWrapper<Lines<W>>,
}

impl Wrap {
    /// Wrapper collecting its output in memory.
    pub fn new(options: WrapOptions) -> Self {
        Self::with_sink(options, Vec::new())
    }

    /// Finish and return the output as text.
    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.finish()?)?)
    }
}

impl<W: Write> Wrap<W> {
    pub fn with_sink(options: WrapOptions, sink: W) -> Self {
        Self {
            engine: HardWrapper::new(options, Lines::new(sink)),
        }
    }

    pub fn options(&self) -> &WrapOptions {
        &self.engine.options
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        Ok(self.engine.feed(bytes)?)
    }

    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    /// Flush a trailing partial codepoint and return the sink.
    pub fn finish(mut self) -> Result<W> {
        self.engine.flush()?;
        Ok(self.engine.sink.into_inner())
    }
}

impl<W: Write> Write for Wrap<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.engine.sink.get_mut().flush()
    }
}

/// Number of lines a [`Wrap`] with the same options would produce, without
/// materializing them.
#[derive(Debug)]
pub struct WrapHeight {
    engine: HardWrapper<LineCounter>,
}

impl WrapHeight {
    pub fn new(options: WrapOptions) -> Self {
        Self {
            engine: HardWrapper::new(options, LineCounter::default()),
        }
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) {
        let Ok(()) = self.engine.feed(bytes);
    }

    pub fn write_str(&mut self, text: &str) {
        self.write_bytes(text.as_bytes());
    }

    pub fn height(&mut self) -> usize {
        let Ok(()) = self.engine.flush();
        self.engine.sink.breaks() + 1
    }
}

/// Hard-wrap `text` at `limit` cells with default options.
pub fn wrap_str(text: &str, limit: usize) -> String {
    let mut wrap = Wrap::new(WrapOptions::new(limit));
    wrap.write_str(text)
        .and_then(|()| wrap.into_string())
        .expect(INFALLIBLE_STR)
}

/// Byte variant of [`wrap_str`].
pub fn wrap_bytes(bytes: &[u8], limit: usize) -> Vec<u8> {
    let mut wrap = Wrap::new(WrapOptions::new(limit));
    wrap.write_bytes(bytes)
        .and_then(|()| wrap.finish())
        .expect(INFALLIBLE_BYTES)
}

/// Line count of [`wrap_str`] for the same input.
pub fn height(text: &str, limit: usize) -> usize {
    height_bytes(text.as_bytes(), limit)
}

pub fn height_bytes(bytes: &[u8], limit: usize) -> usize {
    let mut height = WrapHeight::new(WrapOptions::new(limit));
    height.write_bytes(bytes);
    height.height()
}
