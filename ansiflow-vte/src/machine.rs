use crate::enums::State;
use crate::transitions;

/// Outcome of feeding one byte to a [`StateMachine`].
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateTransition {
    pub previous: State,
    pub next: State,
}

impl StateTransition {
    #[inline]
    pub const fn new(previous: State, next: State) -> Self {
        Self { previous, next }
    }

    /// Whether the byte moved the machine to a different state.
    #[inline]
    pub fn changed(&self) -> bool {
        self.previous != self.next
    }

    /// Whether the byte that caused this transition was ordinary text.
    #[inline]
    pub fn is_printing(&self) -> bool {
        self.previous == State::Printing && self.next == State::Printing
    }
}

/// Byte-at-a-time escape-sequence scanner.
///
/// Holds nothing but the live [`State`]; every call is O(1) and never
/// allocates. Malformed sequences fall into [`State::Unknown`] and are
/// skipped up to the next terminator.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateMachine {
    state: State,
}

impl StateMachine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Live state of the scanner.
    #[inline]
    pub fn state(&self) -> State {
        self.state
    }

    /// Consume `byte` and report the transition it caused.
    #[inline]
    pub fn next(&mut self, byte: u8) -> StateTransition {
        let previous = self.state;
        self.state = transitions::transit(previous, byte);
        StateTransition::new(previous, self.state)
    }
}
