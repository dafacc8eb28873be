use ansiflow_vte::{AnsiTracker, Codepoint, Decoded, StateTransition, Utf8Decoder};

/// One decoded codepoint and whether it is ordinary text.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Unit {
    pub(crate) cp: Codepoint,
    pub(crate) printing: bool,
}

impl Unit {
    #[inline]
    pub(crate) fn char(&self) -> char {
        self.cp.char()
    }

    #[inline]
    pub(crate) fn bytes(&self) -> &[u8] {
        self.cp.as_bytes()
    }

    /// A printable codepoint contained in `set`.
    #[inline]
    pub(crate) fn is_printing_in(&self, set: &[char]) -> bool {
        self.printing && set.contains(&self.cp.char())
    }
}

/// Units decoded from one input byte, in input order.
#[derive(Debug, Default)]
pub(crate) struct Units {
    buf: [Option<Unit>; 4],
    pos: usize,
}

impl Units {
    /// Abandoned bytes were fed before the current one and carry the
    /// printing state of that earlier byte.
    fn new(decoded: &Decoded, stale: bool, printing: bool) -> Self {
        let abandoned = decoded.abandoned().map(|cp| Unit {
            cp,
            printing: stale,
        });
        let complete = decoded.complete().map(|cp| Unit { cp, printing });

        let mut units = Self::default();
        for (slot, unit) in units.buf.iter_mut().zip(abandoned.chain(complete)) {
            *slot = Some(unit);
        }
        units
    }
}

impl Iterator for Units {
    type Item = Unit;

    fn next(&mut self) -> Option<Unit> {
        let unit = self.buf.get_mut(self.pos)?.take();
        self.pos += 1;
        unit
    }
}

/// Canonical byte loop shared by every transformer: each byte advances the
/// tracker, and a codepoint is printable when the transition caused by its
/// last byte is.
#[derive(Debug, Default)]
pub(crate) struct UnitScanner {
    tracker: AnsiTracker,
    decoder: Utf8Decoder,
    last: StateTransition,
}

impl UnitScanner {
    #[inline]
    pub(crate) fn push(&mut self, byte: u8) -> Units {
        let stale = self.last.is_printing();
        self.last = self.tracker.next(byte);
        Units::new(&self.decoder.push(byte), stale, self.last.is_printing())
    }

    /// Emit the bytes of an incomplete trailing codepoint.
    pub(crate) fn flush(&mut self) -> Units {
        let printing = self.last.is_printing();
        Units::new(&self.decoder.flush(), printing, printing)
    }

    #[inline]
    pub(crate) fn tracker(&self) -> &AnsiTracker {
        &self.tracker
    }
}
