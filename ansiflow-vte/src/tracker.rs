use std::io::{self, Write};

use log::trace;

use crate::collector::{Command, CommandCollector};
use crate::enums::State;
use crate::machine::StateTransition;

const SGR_RESET: &[u8] = b"\x1b[0m";
const HYPERLINK_CLOSE: &[u8] = b"\x1b]8;;\x1b\\";

/// Styling and hyperlink currently in effect.
///
/// Only the latest unreset command of each kind is remembered: a new color
/// or link supersedes the previous one without an explicit close.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AnsiState {
    pub color: Option<Command>,
    pub link: Option<Command>,
}

impl AnsiState {
    /// Update the state from a completed command. Commands other than SGR
    /// and OSC 8 are ignored.
    pub fn apply(&mut self, command: Command) {
        if command.is_sgr() {
            if command.is_sgr_reset() {
                self.color = None;
            } else {
                self.color = Some(command);
            }
        } else if command.is_hyperlink() {
            if command.is_hyperlink_close() {
                self.link = None;
            } else {
                self.link = Some(command);
            }
        }
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.color.is_some() || self.link.is_some()
    }

    /// Bytes that return a terminal to a neutral state: color reset first,
    /// then hyperlink close.
    pub fn neutralize_sequence(&self) -> Vec<u8> {
        let mut out = Vec::new();
        if self.color.is_some() {
            out.extend_from_slice(SGR_RESET);
        }
        if self.link.is_some() {
            out.extend_from_slice(HYPERLINK_CLOSE);
        }
        out
    }

    /// Bytes re-issuing the remembered commands, color first.
    pub fn restore_sequence(&self) -> Vec<u8> {
        let mut out = Vec::new();
        for command in [&self.color, &self.link].into_iter().flatten() {
            command.write_to(&mut out);
        }
        out
    }

    /// Bytes re-opening the remembered hyperlink only.
    pub fn restore_link_sequence(&self) -> Vec<u8> {
        self.link.as_ref().map(Command::to_bytes).unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.color = None;
        self.link = None;
    }
}

/// Scanner that remembers the active style and link of everything it has
/// consumed, so synthetic content can be spliced into a styled stream.
#[derive(Debug, Default, Clone)]
pub struct AnsiTracker {
    collector: CommandCollector,
    state: AnsiState,
}

impl AnsiTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume `byte`; completed commands update the active state.
    pub fn next(&mut self, byte: u8) -> StateTransition {
        let (transition, command) = self.collector.next(byte);
        if let Some(command) = command {
            trace!(
                "tracked {:?} command {:?}",
                command.kind,
                String::from_utf8_lossy(&command.id)
            );
            self.state.apply(command);
        }
        transition
    }

    /// Scanner state after the last consumed byte.
    #[inline]
    pub fn scan_state(&self) -> State {
        self.collector.state()
    }

    #[inline]
    pub fn state(&self) -> &AnsiState {
        &self.state
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.state.is_dirty()
    }

    pub fn neutralize_sequence(&self) -> Vec<u8> {
        self.state.neutralize_sequence()
    }

    pub fn restore_sequence(&self) -> Vec<u8> {
        self.state.restore_sequence()
    }

    pub fn restore_link_sequence(&self) -> Vec<u8> {
        self.state.restore_link_sequence()
    }

    /// Forget the remembered style without emitting anything.
    pub fn reset(&mut self) {
        trace!("tracker reset");
        self.state.reset();
    }

    pub fn write_neutralize<W: Write + ?Sized>(
        &self,
        out: &mut W,
    ) -> io::Result<()> {
        if self.is_dirty() {
            out.write_all(&self.neutralize_sequence())?;
        }
        Ok(())
    }

    pub fn write_restore<W: Write + ?Sized>(&self, out: &mut W) -> io::Result<()> {
        if self.is_dirty() {
            out.write_all(&self.restore_sequence())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(input: &[u8]) -> AnsiTracker {
        let mut tracker = AnsiTracker::new();
        for &b in input {
            tracker.next(b);
        }
        tracker
    }

    #[test]
    fn sgr_reset_clears_color() {
        let tracker = track(b"\x1b[38;2;249;38;114mfoo\x1b[0m");
        assert!(!tracker.is_dirty());
        assert!(tracker.neutralize_sequence().is_empty());
        assert!(tracker.restore_sequence().is_empty());
    }

    #[test]
    fn hyperlink_close_clears_link() {
        let tracker = track(b"\x1b]8;;http://example.com\x07text\x1b]8;;\x07");
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn latest_color_wins() {
        let tracker = track(b"\x1b[31mred\x1b[1;32mgreen");
        assert_eq!(tracker.state().color, Some(Command::csi("1;32m")));
        assert_eq!(tracker.restore_sequence(), b"\x1b[1;32m".to_vec());
    }

    #[test]
    fn non_sgr_csi_is_ignored() {
        let tracker = track(b"\x1b[2J\x1b[10;3H");
        assert!(!tracker.is_dirty());
    }

    #[test]
    fn neutralize_and_restore_order() {
        let tracker = track(b"\x1b]8;id=3;http://a\x07\x1b[4mx");
        assert_eq!(
            tracker.neutralize_sequence(),
            b"\x1b[0m\x1b]8;;\x1b\\".to_vec()
        );
        assert_eq!(
            tracker.restore_sequence(),
            b"\x1b[4m\x1b]8;id=3;http://a\x1b\\".to_vec()
        );
        assert_eq!(
            tracker.restore_link_sequence(),
            b"\x1b]8;id=3;http://a\x1b\\".to_vec()
        );
    }

    #[test]
    fn restore_reproduces_state() {
        let tracker = track(b"\x1b[33m\x1b]8;;file:///x\x1b\\y");
        let mut replay = track(&tracker.neutralize_sequence());
        assert!(!replay.is_dirty());
        for b in tracker.restore_sequence() {
            replay.next(b);
        }
        assert_eq!(replay.state(), tracker.state());
    }

    #[test]
    fn reset_forgets_without_output() {
        let mut tracker = track(b"\x1b[31m");
        tracker.reset();
        assert!(!tracker.is_dirty());
        let mut out = Vec::new();
        tracker.write_neutralize(&mut out).unwrap();
        tracker.write_restore(&mut out).unwrap();
        assert!(out.is_empty());
    }
}
