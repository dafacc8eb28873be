use utf8parse::Receiver;

/// A decoded scalar value together with the raw bytes it came from.
///
/// Invalid input decodes to U+FFFD but keeps its original bytes, so
/// pass-through output stays byte-identical to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Codepoint {
    ch: char,
    bytes: [u8; 4],
    len: u8,
}

impl Codepoint {
    #[inline]
    pub fn char(&self) -> char {
        self.ch
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    fn replacement(byte: u8) -> Self {
        Self {
            ch: char::REPLACEMENT_CHARACTER,
            bytes: [byte, 0, 0, 0],
            len: 1,
        }
    }
}

/// Codepoints produced by one byte of input.
///
/// A byte that cannot continue the pending sequence abandons it: every
/// abandoned byte decodes to its own U+FFFD, and the byte itself is then
/// decoded afresh.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Decoded {
    abandoned: [u8; 3],
    abandoned_len: u8,
    complete: Option<Codepoint>,
}

impl Decoded {
    /// Replacement codepoints for the bytes of an abandoned sequence.
    pub fn abandoned(&self) -> impl Iterator<Item = Codepoint> + '_ {
        self.abandoned[..usize::from(self.abandoned_len)]
            .iter()
            .map(|&byte| Codepoint::replacement(byte))
    }

    /// The codepoint completed by the byte itself.
    #[inline]
    pub fn complete(&self) -> Option<Codepoint> {
        self.complete
    }

    /// Everything decoded, in input order.
    pub fn codepoints(&self) -> impl Iterator<Item = Codepoint> + '_ {
        self.abandoned().chain(self.complete)
    }

    fn abandon(&mut self, bytes: &[u8]) {
        self.abandoned[..bytes.len()].copy_from_slice(bytes);
        self.abandoned_len = bytes.len() as u8;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Pending,
    Char(char),
    Invalid,
}

impl Receiver for Step {
    fn codepoint(&mut self, c: char) {
        *self = Step::Char(c);
    }

    fn invalid_sequence(&mut self) {
        *self = Step::Invalid;
    }
}

/// Streaming UTF-8 decoder that survives sequences split across writes.
#[derive(Default)]
pub struct Utf8Decoder {
    parser: utf8parse::Parser,
    pending: [u8; 4],
    len: u8,
}

impl Utf8Decoder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one byte.
    pub fn push(&mut self, byte: u8) -> Decoded {
        let mut decoded = Decoded::default();
        let mut step = self.advance(byte);

        if step == Step::Invalid && self.len > 1 {
            let stale = usize::from(self.len - 1);
            decoded.abandon(&self.pending[..stale]);
            self.parser = utf8parse::Parser::new();
            self.len = 0;
            step = self.advance(byte);
        }

        decoded.complete = match step {
            Step::Pending => None,
            Step::Char(ch) => Some(self.take(ch)),
            Step::Invalid => Some(self.take(char::REPLACEMENT_CHARACTER)),
        };
        decoded
    }

    /// Abandon an incomplete trailing sequence.
    pub fn flush(&mut self) -> Decoded {
        let mut decoded = Decoded::default();
        decoded.abandon(&self.pending[..usize::from(self.len)]);
        self.parser = utf8parse::Parser::new();
        self.len = 0;
        decoded
    }

    /// Whether a multi-byte sequence is partially decoded.
    #[inline]
    pub fn is_pending(&self) -> bool {
        self.len != 0
    }

    fn advance(&mut self, byte: u8) -> Step {
        // utf8parse resolves every sequence by its fourth byte.
        self.pending[usize::from(self.len)] = byte;
        self.len += 1;

        let mut step = Step::Pending;
        self.parser.advance(&mut step, byte);
        step
    }

    fn take(&mut self, ch: char) -> Codepoint {
        let codepoint = Codepoint {
            ch,
            bytes: self.pending,
            len: self.len,
        };
        self.len = 0;
        codepoint
    }
}

impl std::fmt::Debug for Utf8Decoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Utf8Decoder")
            .field("pending", &&self.pending[..self.len as usize])
            .finish()
    }
}
