//! Byte classifier and transition table for the scanning state machine.
//!
//! Each function in this module handles a single scanner state: given an
//! input byte it returns the next [`State`]. [`action`] maps a finished
//! transition onto the payload work the command collector has to do, which
//! keeps both the scanner and the collector table-driven and easy to audit
//! against the CSI/OSC grammar.

use crate::enums::{Action, State};

/// Escape marker that opens every sequence.
pub const ESC: u8 = 0x1b;

/// Bell, one of the two OSC terminators.
pub const BEL: u8 = 0x07;

/// Introducer of a Control Sequence (`ESC [`).
pub const CSI_INTRODUCER: u8 = b'[';

/// Introducer of an Operating System Command (`ESC ]`).
pub const OSC_INTRODUCER: u8 = b']';

/// Second byte of the String Terminator `ESC \`.
pub const ST_FINAL: u8 = b'\\';

/// Separator between OSC id and parameters.
pub const OSC_SEPARATOR: u8 = b';';

/// Whether `byte` is the escape marker.
#[inline(always)]
pub const fn is_escape(byte: u8) -> bool {
    byte == ESC
}

/// Whether `byte` ends a CSI or unrecognized sequence (ASCII letters).
#[inline(always)]
pub const fn is_terminator(byte: u8) -> bool {
    matches!(byte, 0x40..=0x5a | 0x61..=0x7a)
}

/// Ordinary text; only the escape marker leaves it.
#[inline(always)]
const fn printing(byte: u8) -> State {
    if is_escape(byte) {
        State::GatheringIntroducer
    } else {
        State::Printing
    }
}

/// Byte right after `ESC` selects the sequence family.
#[inline(always)]
const fn gathering_introducer(byte: u8) -> State {
    use State::*;

    match byte {
        CSI_INTRODUCER => CsiCommand,
        OSC_INTRODUCER => OscCommandId,
        _ if is_terminator(byte) => Printing,
        _ => Unknown,
    }
}

/// CSI bodies and unknown sequences run until a letter.
#[inline(always)]
const fn until_terminator(state: State, byte: u8) -> State {
    if is_terminator(byte) {
        State::Printing
    } else {
        state
    }
}

/// OSC id and parameters; letters are payload, only BEL or ST terminate.
#[inline(always)]
const fn osc(state: State, byte: u8) -> State {
    use State::*;

    match byte {
        OSC_SEPARATOR => OscParameter,
        BEL => Printing,
        ESC => OscParameterPendingEscape,
        _ => state,
    }
}

/// `ESC` inside an OSC: either the start of ST or a literal pair.
#[inline(always)]
const fn osc_pending_escape(byte: u8) -> State {
    match byte {
        ST_FINAL => State::Printing,
        _ => State::OscParameter,
    }
}

/// Core transition table that delegates to state-specific helpers.
#[inline(always)]
pub(crate) const fn transit(state: State, byte: u8) -> State {
    use State::*;

    match state {
        Printing => printing(byte),
        GatheringIntroducer => gathering_introducer(byte),
        CsiCommand | Unknown => until_terminator(state, byte),
        OscCommandId | OscParameter => osc(state, byte),
        OscParameterPendingEscape => osc_pending_escape(byte),
    }
}

/// Payload work attached to the transition `from -> next` caused by `byte`.
#[inline(always)]
pub(crate) const fn action(from: State, next: State, byte: u8) -> Action {
    use State::*;

    match (from, next) {
        (CsiCommand, CsiCommand) | (OscCommandId, OscCommandId) => Action::Put,
        (CsiCommand, Printing) => Action::CsiEnd,
        (OscCommandId, OscParameter | OscParameterPendingEscape) => {
            Action::OscId
        },
        (OscParameter, OscParameter) if byte == OSC_SEPARATOR => {
            Action::OscParam
        },
        (OscParameter, OscParameter) => Action::Put,
        (OscParameterPendingEscape, OscParameter) => Action::PutEscaped,
        (
            OscCommandId | OscParameter | OscParameterPendingEscape,
            Printing,
        ) => Action::OscEnd,
        _ => Action::None,
    }
}
