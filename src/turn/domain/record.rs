//! The per-turn record tracked by the registry.

use chrono::{DateTime, Utc};
use mockable::Clock;

use super::{TurnDomainError, TurnRole, TurnState};
use crate::page::domain::NodeId;

/// Lifecycle record for one distinct turn element.
///
/// Created on first sighting (initial scan or mutation callback), mutated
/// only by the observation controller, and discarded wholesale when the
/// registry is cleared on navigation reset, never persisted across a
/// reset. The record holds a weak node handle only; the live page owns
/// the element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    node: NodeId,
    role: TurnRole,
    state: TurnState,
    text: Option<String>,
    captured_at: Option<DateTime<Utc>>,
}

impl TurnRecord {
    /// Creates a freshly discovered record.
    #[must_use]
    pub const fn discovered(node: NodeId, role: TurnRole) -> Self {
        Self {
            node,
            role,
            state: TurnState::Discovered,
            text: None,
            captured_at: None,
        }
    }

    /// Returns the weak node handle.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the authorship classification.
    #[must_use]
    pub const fn role(&self) -> TurnRole {
        self.role
    }

    /// Returns the current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> TurnState {
        self.state
    }

    /// Returns the last extracted normalized text, when any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Returns when the record entered `CaptureReady`, when it has.
    #[must_use]
    pub const fn captured_at(&self) -> Option<DateTime<Utc>> {
        self.captured_at
    }

    /// Returns `true` once the record has reached its terminal state.
    #[must_use]
    pub const fn is_capture_ready(&self) -> bool {
        self.state.is_terminal()
    }

    /// Refines the role; a turn classified `Unknown` at discovery may be
    /// reclassified once later mutations reveal role markers.
    pub fn refine_role(&mut self, role: TurnRole) {
        if self.role == TurnRole::Unknown && role != TurnRole::Unknown {
            self.role = role;
        }
    }

    /// Stores the latest extracted text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
    }

    /// Moves the record to `next`, stamping `captured_at` on entry into
    /// the terminal state.
    ///
    /// # Errors
    ///
    /// Returns [`TurnDomainError::InvalidTransition`] when the state
    /// machine forbids the move.
    pub fn transition(
        &mut self,
        next: TurnState,
        clock: &impl Clock,
    ) -> Result<(), TurnDomainError> {
        self.state = self.state.transition(next)?;
        if self.state.is_terminal() {
            self.captured_at = Some(clock.utc());
        }
        Ok(())
    }
}
