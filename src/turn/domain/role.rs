//! Authorship classification for a turn.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnRole {
    /// The human participant.
    User,
    /// The platform's assistant.
    Agent,
    /// Neither role rule matched. Unknown turns are still tracked and may
    /// be captured opportunistically when they carry substantial text.
    Unknown,
}

impl TurnRole {
    /// Returns the canonical role string.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Agent => "agent",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for TurnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
