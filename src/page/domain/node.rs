//! Weak-identity handles for live page elements.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Weak-identity handle for an element owned by the live page.
///
/// The pipeline keys all per-message state on this handle in a side table
/// and never owns, clones, or outlives the underlying element. Handles are
/// minted by whatever adapter backs the [`crate::page::ports::PageDom`]
/// port and are only meaningful against that adapter; a handle whose
/// element has been removed simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    /// Creates a handle from a raw adapter-assigned value.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}
