//! Wrap, pad, truncate, indent and linkify terminal text without breaking
//! the ANSI escape sequences embedded in it.
//!
//! Every transformer tracks the style and hyperlink in effect through
//! [`vte::AnsiTracker`], so synthetic content (line breaks, padding,
//! indentation, tails) is spliced in outside that style and the style is
//! restored afterwards.
//!
//! ```
//! use ansiflow::{WordWrap, WordWrapOptions};
//!
//! let mut wrap = WordWrap::new(WordWrapOptions::new(3).break_ansi(true));
//! wrap.write_str("\x1b[31mfoo bar").unwrap();
//! assert_eq!(wrap.into_string().unwrap(), "\x1b[31mfoo\x1b[0m\n\x1b[31mbar");
//! ```

mod error;
mod fill;
mod indent;
mod layout;
mod linkify;
mod padding;
mod truncate;
mod units;
mod writer;

pub mod wordwrap;
pub mod wrap;

pub use ansiflow_vte as vte;
pub use error::{Error, Result};
pub use fill::Fill;
pub use indent::{Indent, indent_str};
pub use linkify::{
    DEFAULT_LINK_PATTERN, Linkify, link_id, linkify_str, write_link,
};
pub use padding::{Pad, pad_str};
pub use truncate::{Truncate, truncate_str};
pub use vte::{printable_width, printable_width_bytes, strip};
pub use wordwrap::{
    WordWrap, WordWrapHeight, WordWrapOptions, word_wrap_bytes, word_wrap_str,
};
pub use wrap::{Wrap, WrapHeight, WrapOptions, wrap_bytes, wrap_str};
pub use writer::AnsiWriter;
