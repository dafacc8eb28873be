use std::io::{self, Write};

use ansiflow_vte::{AnsiTracker, StateTransition};

/// Forwarding writer that tracks the style of everything written through
/// it, so callers can step outside and back into that style.
#[derive(Debug)]
pub struct AnsiWriter<W> {
    inner: W,
    tracker: AnsiTracker,
    last: StateTransition,
}

impl<W: Write> AnsiWriter<W> {
    pub fn new(inner: W) -> Self {
        Self::with_tracker(inner, AnsiTracker::new())
    }

    /// Continue from a previously tracked state.
    pub fn with_tracker(inner: W, tracker: AnsiTracker) -> Self {
        Self {
            inner,
            tracker,
            last: StateTransition::default(),
        }
    }

    /// Write the neutralize sequence if any style is active.
    pub fn neutralize(&mut self) -> io::Result<()> {
        self.tracker.write_neutralize(&mut self.inner)
    }

    /// Re-issue the active style.
    pub fn restore(&mut self) -> io::Result<()> {
        self.tracker.write_restore(&mut self.inner)
    }

    /// Forget the active style without writing anything.
    pub fn clear(&mut self) {
        self.tracker.reset();
    }

    /// Whether the last byte written was ordinary text.
    pub fn is_printing(&self) -> bool {
        self.last.is_printing()
    }

    pub fn tracker(&self) -> &AnsiTracker {
        &self.tracker
    }

    pub fn get_ref(&self) -> &W {
        &self.inner
    }

    /// Raw access to the sink; bytes written here bypass tracking.
    pub fn get_mut(&mut self) -> &mut W {
        &mut self.inner
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for AnsiWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        // Track only what the sink accepted.
        let written = self.inner.write(buf)?;
        for &byte in &buf[..written] {
            self.last = self.tracker.next(byte);
        }
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
