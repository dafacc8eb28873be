use std::mem;

use log::debug;

use crate::enums::{Action, CommandKind, State};
use crate::hyperlink::Hyperlink;
use crate::machine::{StateMachine, StateTransition};
use crate::transitions::{self, ESC};

/// A completed CSI or OSC sequence.
///
/// For CSI the `id` is the whole body including the final letter
/// (`38;2;249;38;114m`) and `params` is empty. For OSC the `id` is the
/// numeric command (`8`) and `params` are the `;`-separated fields.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Command {
    pub kind: CommandKind,
    pub id: Vec<u8>,
    pub params: Vec<Vec<u8>>,
}

impl Command {
    pub fn csi(id: impl Into<Vec<u8>>) -> Self {
        Self {
            kind: CommandKind::Csi,
            id: id.into(),
            params: Vec::new(),
        }
    }

    pub fn osc<P: Into<Vec<u8>>>(
        id: impl Into<Vec<u8>>,
        params: impl IntoIterator<Item = P>,
    ) -> Self {
        Self {
            kind: CommandKind::Osc,
            id: id.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    /// Select Graphic Rendition: a CSI ending in `m`.
    pub fn is_sgr(&self) -> bool {
        self.kind == CommandKind::Csi && self.id.last() == Some(&b'm')
    }

    /// The universal `ESC[0m` reset.
    pub fn is_sgr_reset(&self) -> bool {
        self.kind == CommandKind::Csi && self.id == b"0m"
    }

    pub fn is_hyperlink(&self) -> bool {
        self.kind == CommandKind::Osc && self.id == b"8"
    }

    /// OSC 8 whose URI parameter is empty or missing.
    pub fn is_hyperlink_close(&self) -> bool {
        self.is_hyperlink() && self.params.get(1).is_none_or(|uri| uri.is_empty())
    }

    /// Typed view of an OSC 8 command that opens a link.
    pub fn hyperlink(&self) -> Option<Hyperlink> {
        if !self.is_hyperlink() {
            return None;
        }

        let metadata = self.params.first().map(Vec::as_slice).unwrap_or_default();
        let uri = self.params.get(1)?;
        Hyperlink::from_params(metadata, uri)
    }

    /// Re-encode the command. OSC commands are always terminated with ST.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        match self.kind {
            CommandKind::Csi => {
                out.extend_from_slice(&[ESC, transitions::CSI_INTRODUCER]);
                out.extend_from_slice(&self.id);
            },
            CommandKind::Osc => {
                out.extend_from_slice(&[ESC, transitions::OSC_INTRODUCER]);
                out.extend_from_slice(&self.id);
                for param in &self.params {
                    out.push(transitions::OSC_SEPARATOR);
                    out.extend_from_slice(param);
                }
                out.extend_from_slice(&[ESC, transitions::ST_FINAL]);
            },
        }
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.id.len() + 4);
        self.write_to(&mut out);
        out
    }
}

/// Gathers the payload of the sequence in progress and yields a
/// [`Command`] at the byte that completes it.
#[derive(Debug, Default, Clone)]
pub struct CommandCollector {
    machine: StateMachine,
    kind: Option<CommandKind>,
    id: Vec<u8>,
    params: Vec<Vec<u8>>,
    payload: Vec<u8>,
    param_open: bool,
}

impl CommandCollector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn state(&self) -> State {
        self.machine.state()
    }

    /// Consume `byte`; the command is returned exactly once, on the
    /// transition back to [`State::Printing`].
    pub fn next(&mut self, byte: u8) -> (StateTransition, Option<Command>) {
        let transition = self.machine.next(byte);
        if transition.is_printing() {
            return (transition, None);
        }

        let command = match transitions::action(
            transition.previous,
            transition.next,
            byte,
        ) {
            Action::None => {
                if transition.previous == State::Unknown
                    && transition.next == State::Printing
                {
                    debug!("discarding unknown escape sequence");
                }
                None
            },
            Action::Put => {
                self.payload.push(byte);
                None
            },
            Action::PutEscaped => {
                self.payload.extend_from_slice(&[ESC, byte]);
                self.param_open = true;
                None
            },
            Action::OscId => {
                self.kind = Some(CommandKind::Osc);
                self.id = mem::take(&mut self.payload);
                self.param_open = byte == transitions::OSC_SEPARATOR;
                None
            },
            Action::OscParam => {
                self.params.push(mem::take(&mut self.payload));
                None
            },
            Action::OscEnd => {
                if self.kind.is_none() {
                    self.kind = Some(CommandKind::Osc);
                    self.id = mem::take(&mut self.payload);
                } else if self.param_open {
                    self.params.push(mem::take(&mut self.payload));
                }
                self.dispatch()
            },
            Action::CsiEnd => {
                self.payload.push(byte);
                self.kind = Some(CommandKind::Csi);
                self.id = mem::take(&mut self.payload);
                self.dispatch()
            },
        };

        (transition, command)
    }

    fn dispatch(&mut self) -> Option<Command> {
        let kind = self.kind.take()?;
        self.payload.clear();
        self.param_open = false;
        Some(Command {
            kind,
            id: mem::take(&mut self.id),
            params: mem::take(&mut self.params),
        })
    }
}
