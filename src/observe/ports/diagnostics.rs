//! Structured diagnostics emitted by the pipeline.
//!
//! Nothing in the pipeline throws into the host page; degraded conditions
//! become diagnostic events for whatever logging or telemetry surface the
//! host chooses. Every event is non-fatal by definition.

use crate::page::domain::NodeId;
use crate::profile::domain::Platform;

/// A structured, non-fatal pipeline event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticEvent {
    /// The conversation container never appeared within the retry budget.
    ContainerNotFound {
        /// The active profile's platform.
        platform: Platform,
        /// How many lookup attempts were made.
        attempts: u32,
    },
    /// No declared profile matched the URL; the generic fallback is in
    /// use with lower extraction confidence.
    UnknownPlatform {
        /// The unmatched page URL.
        url: String,
    },
    /// The capture affordance could not be inserted next to a turn. Text
    /// capture itself is unaffected.
    AffordanceRenderFailed {
        /// The turn the affordance targeted.
        node: NodeId,
        /// Failure description.
        reason: String,
    },
    /// The persistence collaborator rejected or failed a snapshot save.
    /// The turn stays `CaptureReady`; saves are never retried
    /// automatically.
    SnapshotSaveFailed {
        /// The turn whose snapshot failed to save.
        node: NodeId,
        /// Failure description.
        reason: String,
    },
    /// A candidate node was skipped during classification; observation of
    /// the rest of the conversation continues.
    TurnSkipped {
        /// The skipped node.
        node: NodeId,
        /// Why it was skipped.
        reason: String,
    },
}

/// Consumer of structured pipeline diagnostics.
pub trait DiagnosticsSink: Send + Sync {
    /// Records one event. Must never fail or block meaningfully.
    fn emit(&self, event: DiagnosticEvent);
}
