//! Hyperlink auto-detection.
//!
//! URLs and file paths found in runs of printable text are wrapped in OSC 8
//! hyperlinks. Text already inside escape sequences is never rewritten.

use std::io::{self, Write};
use std::sync::LazyLock;

use ansiflow_vte::AnsiTracker;
use log::debug;
use md5::{Digest, Md5};
use regex::bytes::Regex;

use crate::error::{INFALLIBLE_STR, Result};

/// Matches `http`, `https` and `file` URLs as well as absolute, relative and
/// drive-letter paths. A match without the `scheme` group is a bare path and
/// gets a `file://` URI.
pub const DEFAULT_LINK_PATTERN: &str = r#"(?:(?P<scheme>https?|file)://(?:\\\s|\S)*[^\s.,:;!?'")\]]|(?:[A-Za-z]:[\\/]|\.\.?/|/)(?:[^\s\\/]*[\\/])+[^\s\\/]*)"#;

static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(DEFAULT_LINK_PATTERN).expect("link pattern must compile")
});

const LINK_START: &[u8] = b"\x1b]8;";
const LINK_END: &[u8] = b"\x1b\\";

/// Stable hover id of a detected link.
///
/// Terminals highlight every cell sharing an id on hover, so repeated links
/// in one run get distinct ids through `offset`.
pub fn link_id(text: &[u8], offset: usize) -> String {
    let digest = Md5::digest(text);
    let (mut lo, mut hi) = (digest[0], digest[1]);
    for pair in digest[2..].chunks_exact(2) {
        lo = lo.wrapping_add(pair[0]);
        hi = hi.wrapping_add(pair[1]);
    }
    (usize::from(u16::from_le_bytes([lo, hi])) + offset).to_string()
}

/// Write `text` wrapped in an OSC 8 hyperlink to `uri`.
pub fn write_link<W: Write + ?Sized>(
    out: &mut W,
    id: &str,
    uri: &[u8],
    text: &[u8],
) -> io::Result<()> {
    out.write_all(LINK_START)?;
    out.write_all(b"id=")?;
    out.write_all(id.as_bytes())?;
    out.write_all(b";")?;
    out.write_all(uri)?;
    out.write_all(LINK_END)?;
    out.write_all(text)?;
    out.write_all(LINK_START)?;
    out.write_all(b";")?;
    out.write_all(LINK_END)
}

/// Streaming hyperlink detector writing into `W`.
///
/// Printable bytes are held back until the next escape sequence or
/// [`Linkify::finish`], since a link can only be recognized once its run of
/// text is complete.
#[derive(Debug)]
pub struct Linkify<W: Write = Vec<u8>> {
    out: W,
    tracker: AnsiTracker,
    pattern: Regex,
    link_buf: Vec<u8>,
}

impl Linkify {
    pub fn new() -> Self {
        Self::with_sink(Vec::new())
    }

    pub fn into_string(self) -> Result<String> {
        Ok(String::from_utf8(self.finish()?)?)
    }
}

impl Default for Linkify {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> Linkify<W> {
    pub fn with_sink(out: W) -> Self {
        Self {
            out,
            tracker: AnsiTracker::new(),
            pattern: LINK_PATTERN.clone(),
            link_buf: Vec::new(),
        }
    }

    /// Detect links with a custom pattern. A named `scheme` group that does
    /// not take part in a match marks it as a bare path.
    pub fn with_pattern(out: W, pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern)?;
        debug!("compiled link pattern {pattern}");
        Ok(Self {
            out,
            tracker: AnsiTracker::new(),
            pattern,
            link_buf: Vec::new(),
        })
    }

    pub fn write_bytes(&mut self, bytes: &[u8]) -> Result<()> {
        for &byte in bytes {
            if self.tracker.next(byte).is_printing() {
                self.link_buf.push(byte);
            } else {
                self.flush_links()?;
                self.out.write_all(&[byte])?;
            }
        }
        Ok(())
    }

    pub fn write_str(&mut self, text: &str) -> Result<()> {
        self.write_bytes(text.as_bytes())
    }

    pub fn finish(mut self) -> Result<W> {
        self.flush_links()?;
        Ok(self.out)
    }

    fn flush_links(&mut self) -> io::Result<()> {
        if self.link_buf.is_empty() {
            return Ok(());
        }

        let has_scheme = self
            .pattern
            .capture_names()
            .any(|name| name == Some("scheme"));
        let mut head = 0;
        for (offset, caps) in self.pattern.captures_iter(&self.link_buf).enumerate() {
            let Some(found) = caps.get(0) else {
                continue;
            };
            let text = found.as_bytes();

            let mut uri = Vec::with_capacity(text.len() + 7);
            if has_scheme && caps.name("scheme").is_none() {
                uri.extend_from_slice(b"file://");
            }
            uri.extend_from_slice(text);

            self.out.write_all(&self.link_buf[head..found.start()])?;
            write_link(&mut self.out, &link_id(text, offset), &uri, text)?;
            self.out.write_all(&self.tracker.restore_link_sequence())?;
            head = found.end();
        }
        self.out.write_all(&self.link_buf[head..])?;
        self.link_buf.clear();
        Ok(())
    }
}

impl<W: Write> Write for Linkify<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    /// Held back text stays buffered: it may still be part of a link.
    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Wrap every link found in `text` in an OSC 8 hyperlink.
pub fn linkify_str(text: &str) -> String {
    let mut linkify = Linkify::new();
    linkify
        .write_str(text)
        .and_then(|()| linkify.into_string())
        .expect(INFALLIBLE_STR)
}
