//! Diagnostics sinks: structured logging for production, recording for
//! tests.

use crate::observe::ports::{DiagnosticEvent, DiagnosticsSink};
use std::sync::{Mutex, PoisonError};

/// Forwards diagnostics to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogDiagnostics;

impl LogDiagnostics {
    /// Creates the sink.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl DiagnosticsSink for LogDiagnostics {
    fn emit(&self, event: DiagnosticEvent) {
        match event {
            DiagnosticEvent::ContainerNotFound { platform, attempts } => {
                log::warn!("conversation container not found on {platform} after {attempts} attempts");
            }
            DiagnosticEvent::UnknownPlatform { url } => {
                log::info!("no platform profile matched {url}; using generic fallback");
            }
            DiagnosticEvent::AffordanceRenderFailed { node, reason } => {
                log::warn!("affordance render failed for {node}: {reason}");
            }
            DiagnosticEvent::SnapshotSaveFailed { node, reason } => {
                log::warn!("snapshot save failed for {node}: {reason}");
            }
            DiagnosticEvent::TurnSkipped { node, reason } => {
                log::debug!("skipped candidate {node}: {reason}");
            }
        }
    }
}

/// Collects diagnostics in memory for assertions.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    events: Mutex<Vec<DiagnosticEvent>>,
}

impl RecordingDiagnostics {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns copies of every recorded event.
    #[must_use]
    pub fn events(&self) -> Vec<DiagnosticEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Returns how many events matched `predicate`.
    #[must_use]
    pub fn count_matching(&self, predicate: impl Fn(&DiagnosticEvent) -> bool) -> usize {
        self.events().iter().filter(|event| predicate(event)).count()
    }
}

impl DiagnosticsSink for RecordingDiagnostics {
    fn emit(&self, event: DiagnosticEvent) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event);
    }
}
