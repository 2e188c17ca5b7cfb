//! Domain errors for turn lifecycle management.

use super::TurnState;
use thiserror::Error;

/// Errors raised by the turn state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TurnDomainError {
    /// The requested state change is not a legal transition.
    #[error("illegal turn transition: {from} → {to}")]
    InvalidTransition {
        /// Current state.
        from: TurnState,
        /// Requested state.
        to: TurnState,
    },
}
