//! Turn lifecycle states.

use std::fmt;

/// Where a [`TurnSession`](super::TurnSession) is in its exchange.
///
/// ```text
/// Idle -> Requesting -> Streaming -> Finalizing -> Done
///              |            |
///              +-> Aborted <+
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    /// Credentials checked, request in flight
    Requesting,
    /// Reading the reply body
    Streaming,
    /// Body closed, building the assistant message
    Finalizing,
    Done,
    /// Failed or cancelled. No message was produced.
    Aborted,
}

impl TurnState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Done | TurnState::Aborted)
    }

    pub fn is_active(&self) -> bool {
        matches!(
            self,
            TurnState::Requesting | TurnState::Streaming | TurnState::Finalizing
        )
    }

    /// Whether `next` is a legal successor of this state.
    pub fn can_transition_to(&self, next: TurnState) -> bool {
        use TurnState::*;
        matches!(
            (*self, next),
            (Idle, Requesting)
                | (Requesting, Streaming)
                | (Requesting, Aborted)
                | (Streaming, Finalizing)
                | (Streaming, Aborted)
                | (Finalizing, Done)
        )
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TurnState::Idle => "idle",
            TurnState::Requesting => "requesting",
            TurnState::Streaming => "streaming",
            TurnState::Finalizing => "finalizing",
            TurnState::Done => "done",
            TurnState::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_happy_path_transitions() {
        assert!(TurnState::Idle.can_transition_to(TurnState::Requesting));
        assert!(TurnState::Requesting.can_transition_to(TurnState::Streaming));
        assert!(TurnState::Streaming.can_transition_to(TurnState::Finalizing));
        assert!(TurnState::Finalizing.can_transition_to(TurnState::Done));
    }

    #[test]
    fn test_abort_only_from_requesting_or_streaming() {
        assert!(TurnState::Requesting.can_transition_to(TurnState::Aborted));
        assert!(TurnState::Streaming.can_transition_to(TurnState::Aborted));
        assert!(!TurnState::Idle.can_transition_to(TurnState::Aborted));
        assert!(!TurnState::Finalizing.can_transition_to(TurnState::Aborted));
        assert!(!TurnState::Done.can_transition_to(TurnState::Aborted));
    }

    #[test]
    fn test_terminal_states_have_no_successor() {
        for next in [
            TurnState::Idle,
            TurnState::Requesting,
            TurnState::Streaming,
            TurnState::Done,
        ] {
            assert!(!TurnState::Done.can_transition_to(next));
            assert!(!TurnState::Aborted.can_transition_to(next));
        }
    }

    #[test]
    fn test_flags_and_display() {
        assert!(TurnState::Streaming.is_active());
        assert!(!TurnState::Idle.is_active());
        assert!(TurnState::Aborted.is_terminal());
        assert_eq!(TurnState::Finalizing.to_string(), "finalizing");
    }
}
