/// State of the escape-sequence scanner.
///
/// Exactly one state is live at a time. `Printing` is the ground state: the
/// byte that keeps the machine in it is ordinary text.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum State {
    /// Not inside any escape sequence.
    #[default]
    Printing,
    /// Saw `ESC`, waiting for the byte that identifies the sequence family.
    GatheringIntroducer,
    /// Inside the body of a CSI sequence (`ESC [`).
    CsiCommand,
    /// Collecting the numeric id of an OSC sequence (`ESC ]`).
    OscCommandId,
    /// Collecting a `;`-separated OSC parameter.
    OscParameter,
    /// Inside an OSC parameter right after an `ESC`. Either the `\` of a
    /// String Terminator follows, or the pair is literal payload.
    OscParameterPendingEscape,
    /// Malformed or unsupported sequence body, skipped up to a terminator.
    Unknown,
}

impl State {
    /// Whether bytes consumed in this state belong to a collected payload.
    #[inline]
    pub const fn has_payload(self) -> bool {
        matches!(
            self,
            Self::CsiCommand
                | Self::OscCommandId
                | Self::OscParameter
                | Self::OscParameterPendingEscape
        )
    }
}

/// Family of a completed escape sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Control Sequence Introducer, `ESC [ … <letter>`.
    Csi,
    /// Operating System Command, `ESC ] id ; … (BEL | ESC \)`.
    Osc,
}

/// Work the collector performs for a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Action {
    None,
    /// Append the byte to the payload.
    Put,
    /// Append `ESC` followed by the byte; the escape was not a terminator.
    PutEscaped,
    /// The payload so far is the OSC command id.
    OscId,
    /// `;` inside parameters: the payload so far is a finished parameter.
    OscParam,
    /// OSC terminated by `BEL` or ST.
    OscEnd,
    /// CSI terminated by its final letter.
    CsiEnd,
}
