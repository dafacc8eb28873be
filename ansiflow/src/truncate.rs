use std::io::{self, Write};

use ansiflow_vte::{char_width, printable_width_bytes};
use log::trace;

use crate::error::{INFALLIBLE_STR, Result};
use crate::units::{Unit, UnitScanner};

/// Cuts printable content at a cell width and appends a tail.
///
/// Escape sequences after the cut still pass through, so the styling of the
/// output stays balanced. Truncation is streaming: the tail is written as
/// soon as the content exceeds the width left after reserving room for it.
#[derive(Debug)]
pub struct Truncate<W: Write = Vec<u8>> {
    out: W,
    scanner: UnitScanner,
    tail: Vec<u8>,
    budget: usize,
    cur_width: usize,
    truncating: bool,
}

impl Truncate {
    pub fn new(width: usize, tail: impl Into<Vec<u8>>) -> Self {
        Self::with_sink(width, tail, Vec::new())
    }

    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.finish()?)?)
    }
}

impl<W: Write> Truncate<W> {
    /// A tail wider than `width` is dropped.
    pub fn with_sink(width: usize, tail: impl Into<Vec<u8>>, out: W) -> Self {
        let mut tail = tail.into();
        let tail_width = printable_width_bytes(&tail);
        let budget = match width.checked_sub(tail_width) {
            Some(budget) => budget,
            None => {
                tail.clear();
                width
            },
        };

        Self {
            out,
            scanner: UnitScanner::default(),
            tail,
            budget,
            cur_width: 0,
            truncating: false,
        }
    }

    pub fn is_truncating(&self) -> bool {
        self.truncating
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

    /// Neutralize any style left open after the cut.
    pub fn close(&mut self) -> Result<()> {
        for unit in self.scanner.flush() {
            self.step(unit)?;
        }
        if self.truncating {
            self.scanner.tracker().write_neutralize(&mut self.out)?;
        }
        Ok(())
    }

    pub fn finish(mut self) -> Result<W> {
        self.close()?;
        Ok(self.out)
    }

    fn step(&mut self, unit: Unit) -> io::Result<()> {
        if unit.printing {
            self.cur_width += char_width(unit.char());
        }

        if !self.truncating && self.cur_width > self.budget {
            trace!("truncating at {} cells", self.budget);
            self.out.write_all(&self.tail)?;
            self.truncating = true;
        }

        if !unit.printing || !self.truncating {
            self.out.write_all(unit.bytes())?;
        }
        Ok(())
    }
}

impl<W: Write> Write for Truncate<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Truncate `text` to `width` cells, ending with `tail` when cut.
pub fn truncate_str(text: &str, width: usize, tail: &str) -> String {
    let mut truncate = Truncate::new(width, tail);
    truncate
        .write_str(text)
        .and_then(|()| truncate.into_string())
        .expect(INFALLIBLE_STR)
}
