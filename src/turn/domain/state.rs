//! The turn lifecycle state machine.

use super::TurnDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a tracked turn.
///
/// Legal transitions:
///
/// ```text
/// Discovered → Incomplete → Complete → CaptureReady
/// Discovered ------------→ Complete            (non-streaming platforms)
/// ```
///
/// `CaptureReady` is terminal: a turn reaches it at most once for its
/// lifetime in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnState {
    /// First sighting; nothing evaluated yet.
    Discovered,
    /// Still streaming, or its text is below the capture threshold.
    Incomplete,
    /// Finished streaming; parked here while its text stays below the
    /// capture threshold.
    Complete,
    /// Final text extracted and offered for capture. Terminal.
    CaptureReady,
}

impl TurnState {
    /// Returns the canonical state string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Discovered => "discovered",
            Self::Incomplete => "incomplete",
            Self::Complete => "complete",
            Self::CaptureReady => "capture_ready",
        }
    }

    /// Returns `true` for the terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::CaptureReady)
    }

    /// Returns `true` when the machine permits moving to `next`.
    #[must_use]
    pub const fn can_transition(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::Incomplete)
                | (Self::Discovered, Self::Complete)
                | (Self::Incomplete, Self::Complete)
                | (Self::Complete, Self::CaptureReady)
        )
    }

    /// Validates a transition to `next`.
    ///
    /// # Errors
    ///
    /// Returns [`TurnDomainError::InvalidTransition`] when the machine
    /// forbids the move.
    pub const fn transition(self, next: Self) -> Result<Self, TurnDomainError> {
        if self.can_transition(next) {
            Ok(next)
        } else {
            Err(TurnDomainError::InvalidTransition {
                from: self,
                to: next,
            })
        }
    }
}

impl fmt::Display for TurnState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
