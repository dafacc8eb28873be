//! Output side of the line-layout engines.
//!
//! Wrapping decisions are made once, by the engines in [`crate::wrap`] and
//! [`crate::wordwrap`]. They report those decisions to a [`LineSink`], which
//! either materializes the text ([`Lines`]) or only counts line breaks
//! ([`LineCounter`]). Sharing the engine keeps the height-only variants in
//! lockstep with the full ones.

use std::convert::Infallible;
use std::io::{self, Write};

use ansiflow_vte::AnsiTracker;

use crate::fill::Fill;

pub(crate) trait LineSink {
    /// Counting sinks never fail; writing sinks fail with their writer.
    type Error;

    /// Bytes that go straight to the current line.
    fn text(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// A break inserted by the layout engine. With `ansi` set, the active
    /// style is neutralized before the break and restored after it.
    fn line_break(
        &mut self,
        newline: &[u8],
        ansi: Option<&AnsiTracker>,
    ) -> Result<(), Self::Error>;

    /// An input newline forwarded without any decoration.
    fn newline(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Word wrap keeps the pending word and whitespace in the sink so the
    /// counting sink never has to buffer anything.
    fn stage_word(&mut self, _bytes: &[u8]) {}

    fn stage_space(&mut self, _bytes: &[u8]) {}

    fn commit_space(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn discard_space(&mut self) {}

    fn commit_word(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

pub(crate) type SinkResult<S> = Result<(), <S as LineSink>::Error>;

/// Sink that writes the laid out text into `W`.
#[derive(Debug)]
pub(crate) struct Lines<W> {
    out: W,
    word: Vec<u8>,
    space: Vec<u8>,
    break_fill: Option<(Fill, usize)>,
}

impl<W: Write> Lines<W> {
    pub(crate) fn new(out: W) -> Self {
        Self {
            out,
            word: Vec::new(),
            space: Vec::new(),
            break_fill: None,
        }
    }

    pub(crate) fn set_break_fill(&mut self, fill: Fill, units: usize) {
        self.break_fill = Some((fill, units));
    }

    pub(crate) fn get_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub(crate) fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> LineSink for Lines<W> {
    type Error = io::Error;

    fn text(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    fn line_break(
        &mut self,
        newline: &[u8],
        ansi: Option<&AnsiTracker>,
    ) -> io::Result<()> {
        if let Some(tracker) = ansi {
            tracker.write_neutralize(&mut self.out)?;
        }
        self.out.write_all(newline)?;
        if let Some((fill, units)) = self.break_fill.as_mut() {
            fill.emit(&mut self.out, *units)?;
        }
        if let Some(tracker) = ansi {
            tracker.write_restore(&mut self.out)?;
        }
        Ok(())
    }

    fn newline(&mut self, bytes: &[u8]) -> io::Result<()> {
        self.out.write_all(bytes)
    }

    fn stage_word(&mut self, bytes: &[u8]) {
        self.word.extend_from_slice(bytes);
    }

    fn stage_space(&mut self, bytes: &[u8]) {
        self.space.extend_from_slice(bytes);
    }

    fn commit_space(&mut self) -> io::Result<()> {
        self.out.write_all(&self.space)?;
        self.space.clear();
        Ok(())
    }

    fn discard_space(&mut self) {
        self.space.clear();
    }

    fn commit_word(&mut self) -> io::Result<()> {
        self.out.write_all(&self.word)?;
        self.word.clear();
        Ok(())
    }
}

/// Sink that only counts line breaks.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct LineCounter {
    breaks: usize,
}

impl LineCounter {
    pub(crate) fn breaks(&self) -> usize {
        self.breaks
    }
}

impl LineSink for LineCounter {
    type Error = Infallible;

    fn text(&mut self, _bytes: &[u8]) -> Result<(), Infallible> {
        Ok(())
    }

    fn line_break(
        &mut self,
        _newline: &[u8],
        _ansi: Option<&AnsiTracker>,
    ) -> Result<(), Infallible> {
        self.breaks += 1;
        Ok(())
    }

    fn newline(&mut self, _bytes: &[u8]) -> Result<(), Infallible> {
        self.breaks += 1;
        Ok(())
    }
}
