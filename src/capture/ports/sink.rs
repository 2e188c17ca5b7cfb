//! Persistence port for captured snapshots.

use crate::capture::domain::MessageSnapshot;
use async_trait::async_trait;
use thiserror::Error;

/// Result type for snapshot persistence.
pub type SinkResult<T> = Result<T, CaptureSinkError>;

/// Acknowledgement returned by a successful save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReceipt {
    /// Identifier assigned by the persistence collaborator, when it
    /// assigns one.
    pub stored_id: Option<String>,
}

impl SaveReceipt {
    /// A receipt with no collaborator-assigned identifier.
    #[must_use]
    pub const fn anonymous() -> Self {
        Self { stored_id: None }
    }

    /// A receipt carrying the collaborator's identifier.
    #[must_use]
    pub fn with_id(stored_id: impl Into<String>) -> Self {
        Self {
            stored_id: Some(stored_id.into()),
        }
    }
}

/// Errors surfaced by the persistence collaborator.
///
/// A failed save is terminal for that attempt: the pipeline reports it
/// through diagnostics and never retries automatically.
#[derive(Debug, Error)]
pub enum CaptureSinkError {
    /// The collaborator rejected the snapshot.
    #[error("snapshot rejected: {reason}")]
    Rejected {
        /// Collaborator-supplied rejection reason.
        reason: String,
    },
    /// The collaborator could not be reached.
    #[error("capture sink unavailable: {reason}")]
    Unavailable {
        /// Transport-level failure description.
        reason: String,
    },
}

/// Destination for captured snapshots.
///
/// Implementations bridge to whatever persistence the host application
/// provides. The pipeline treats this as fire-and-acknowledge: one save
/// call per snapshot, no retry loop.
#[async_trait]
pub trait CaptureSink: Send + Sync {
    /// Persists one snapshot, returning the collaborator's receipt.
    async fn save(&self, snapshot: &MessageSnapshot) -> SinkResult<SaveReceipt>;
}
