//! Rendering port for the capture affordance.
//!
//! The affordance is a small interactive marker inserted beside each
//! capture-ready turn. Rendering goes through a boundary so page styles
//! cannot bleed into the affordance: an isolated boundary when the page
//! supports one, a plain inline fallback otherwise.

use crate::page::domain::NodeId;
use crate::page::ports::{DomError, PageDom};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

/// How an affordance was mounted into the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Inside a style-isolation boundary.
    Isolated,
    /// Directly in the page tree.
    Direct,
}

/// Errors surfaced while rendering an affordance.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The host turn already carries an affordance.
    #[error("affordance already rendered for {0}")]
    AlreadyRendered(NodeId),
    /// The underlying page operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// A mounted affordance next to one turn.
///
/// The handle owns an activation latch: however rapidly the affordance
/// is activated, at most one activation is in flight at a time.
#[derive(Debug, Clone)]
pub struct AffordanceHandle {
    host: NodeId,
    marker: NodeId,
    mode: RenderMode,
    busy: Arc<AtomicBool>,
}

impl AffordanceHandle {
    /// Wraps a freshly inserted marker.
    #[must_use]
    pub fn new(host: NodeId, marker: NodeId, mode: RenderMode) -> Self {
        Self {
            host,
            marker,
            mode,
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns the turn node this affordance is mounted beside.
    #[must_use]
    pub const fn host(&self) -> NodeId {
        self.host
    }

    /// Returns the inserted marker node.
    #[must_use]
    pub const fn marker(&self) -> NodeId {
        self.marker
    }

    /// Returns how the affordance was mounted.
    #[must_use]
    pub const fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Claims the activation latch. Returns `None` when an activation is
    /// already in flight; the caller must drop the guard to release it.
    #[must_use]
    pub fn begin_activation(&self) -> Option<ActivationGuard> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then(|| ActivationGuard {
                busy: Arc::clone(&self.busy),
            })
    }

    /// Removes the marker from the page.
    pub fn dispose(&self, dom: &dyn PageDom) -> Result<(), DomError> {
        dom.remove_node(self.marker)
    }
}

/// RAII latch release for one affordance activation.
#[derive(Debug)]
pub struct ActivationGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for ActivationGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

/// Strategy for mounting the capture affordance.
pub trait RenderBoundary: Send + Sync {
    /// Mounts an affordance beside `host`, refusing a second mount on
    /// the same node.
    fn render(&self, dom: &dyn PageDom, host: NodeId) -> Result<AffordanceHandle, RenderError>;

    /// Returns the mode this boundary mounts in.
    fn mode(&self) -> RenderMode;
}
