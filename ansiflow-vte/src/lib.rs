//! Escape-sequence aware scanning for styled terminal text.
//!
//! [`StateMachine`] classifies a byte stream one byte at a time,
//! [`CommandCollector`] turns completed CSI and OSC sequences into
//! [`Command`]s and [`AnsiTracker`] remembers the style and hyperlink in
//! effect so that synthetic content can be spliced into the stream.

mod collector;
mod enums;
mod hyperlink;
mod machine;
mod tracker;
pub mod transitions;
mod utf8;
pub mod width;

pub use collector::{Command, CommandCollector};
pub use enums::{CommandKind, State};
pub use hyperlink::Hyperlink;
pub use machine::{StateMachine, StateTransition};
pub use tracker::{AnsiState, AnsiTracker};
pub use utf8::{Codepoint, Decoded, Utf8Decoder};
pub use width::{char_width, printable_width, printable_width_bytes, strip};
