//! Hand-off of capture-ready turns to the persistence collaborator.

use crate::capture::domain::MessageSnapshot;
use crate::capture::ports::{
    AffordanceHandle, CaptureSink, CaptureSinkError, RenderBoundary, RenderError, SaveReceipt,
};
use crate::observe::ports::{DiagnosticEvent, DiagnosticsSink};
use crate::page::domain::NodeId;
use crate::page::ports::PageDom;
use crate::profile::domain::Platform;
use crate::turn::domain::TurnRecord;
use mockable::Clock;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

/// Errors surfaced by a manual affordance activation.
#[derive(Debug, Error)]
pub enum ActivationError {
    /// No affordance is mounted for the turn.
    #[error("no affordance mounted for {0}")]
    NoAffordance(NodeId),
    /// An activation for this affordance is already in flight.
    #[error("activation already in flight for {0}")]
    InFlight(NodeId),
    /// The turn carries no extracted text to capture.
    #[error("no extracted text for {0}")]
    NoText(NodeId),
    /// The persistence collaborator failed the save.
    #[error(transparent)]
    Sink(#[from] CaptureSinkError),
}

/// Offers terminal turns to the persistence collaborator and mounts the
/// capture affordance beside them.
///
/// The hand-off is the at-most-once gate: however many times the
/// observation controller re-examines a turn, each node is offered for
/// automatic capture exactly once per session. Degraded conditions
/// (failed save, failed render) become diagnostics and never propagate.
pub struct CaptureHandoff<C: Clock> {
    dom: Arc<dyn PageDom>,
    sink: Arc<dyn CaptureSink>,
    boundary: Arc<dyn RenderBoundary>,
    diagnostics: Arc<dyn DiagnosticsSink>,
    clock: Arc<C>,
    offered: Mutex<HashSet<NodeId>>,
    handles: Mutex<HashMap<NodeId, AffordanceHandle>>,
}

impl<C: Clock> CaptureHandoff<C> {
    /// Wires the hand-off to its collaborators.
    #[must_use]
    pub fn new(
        dom: Arc<dyn PageDom>,
        sink: Arc<dyn CaptureSink>,
        boundary: Arc<dyn RenderBoundary>,
        diagnostics: Arc<dyn DiagnosticsSink>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            dom,
            sink,
            boundary,
            diagnostics,
            clock,
            offered: Mutex::new(HashSet::new()),
            handles: Mutex::new(HashMap::new()),
        }
    }

    /// Offers one capture-ready turn: snapshots it, saves the snapshot,
    /// and mounts the affordance. A node already offered in this session
    /// is a no-op, whatever happened on the first offer.
    pub async fn offer(&self, record: &TurnRecord, platform: Platform) -> Option<MessageSnapshot> {
        let node = record.node();
        if !self.lock_offered().insert(node) {
            return None;
        }
        let Some(text) = record.text() else {
            self.diagnostics.emit(DiagnosticEvent::TurnSkipped {
                node,
                reason: "capture-ready turn has no extracted text".to_owned(),
            });
            return None;
        };
        let snapshot = MessageSnapshot::new(
            text,
            record.role(),
            platform,
            self.dom.page_url(),
            self.dom.page_title(),
            self.clock.as_ref(),
        );
        if let Err(err) = self.sink.save(&snapshot).await {
            self.diagnostics.emit(DiagnosticEvent::SnapshotSaveFailed {
                node,
                reason: err.to_string(),
            });
        }
        self.mount_affordance(node);
        Some(snapshot)
    }

    /// Re-captures a turn through its mounted affordance. Rapid repeated
    /// activations collapse into one: while a save is in flight further
    /// activations fail fast with [`ActivationError::InFlight`].
    ///
    /// # Errors
    ///
    /// Returns [`ActivationError`] when no affordance is mounted, an
    /// activation is already running, the turn has no text, or the sink
    /// fails the save.
    pub async fn activate(
        &self,
        record: &TurnRecord,
        platform: Platform,
    ) -> Result<SaveReceipt, ActivationError> {
        let node = record.node();
        let handle = self
            .handle_for(node)
            .ok_or(ActivationError::NoAffordance(node))?;
        let guard = handle
            .begin_activation()
            .ok_or(ActivationError::InFlight(node))?;
        let text = record.text().ok_or(ActivationError::NoText(node))?;
        let snapshot = MessageSnapshot::new(
            text,
            record.role(),
            platform,
            self.dom.page_url(),
            self.dom.page_title(),
            self.clock.as_ref(),
        );
        let receipt = self.sink.save(&snapshot).await?;
        drop(guard);
        Ok(receipt)
    }

    /// Returns the mounted affordance for a turn, when one exists.
    #[must_use]
    pub fn handle_for(&self, node: NodeId) -> Option<AffordanceHandle> {
        self.lock_handles().get(&node).cloned()
    }

    /// Returns how many turns have been offered this session.
    #[must_use]
    pub fn offered_count(&self) -> usize {
        self.lock_offered().len()
    }

    /// Discards all session state: the offered set and every mounted
    /// affordance. Marker removal is best-effort; after a navigation the
    /// nodes are usually gone already.
    pub fn reset(&self) {
        self.lock_offered().clear();
        let handles = std::mem::take(&mut *self.lock_handles());
        for handle in handles.into_values() {
            handle.dispose(self.dom.as_ref()).ok();
        }
    }

    fn mount_affordance(&self, node: NodeId) {
        let mut handles = self.lock_handles();
        if handles.contains_key(&node) {
            return;
        }
        match self.boundary.render(self.dom.as_ref(), node) {
            Ok(handle) => {
                handles.insert(node, handle);
            }
            Err(RenderError::AlreadyRendered(_)) => {}
            Err(err) => {
                self.diagnostics.emit(DiagnosticEvent::AffordanceRenderFailed {
                    node,
                    reason: err.to_string(),
                });
            }
        }
    }

    fn lock_offered(&self) -> MutexGuard<'_, HashSet<NodeId>> {
        self.offered.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_handles(&self) -> MutexGuard<'_, HashMap<NodeId, AffordanceHandle>> {
        self.handles.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
