//! Side-table of tracked turns keyed by weak node identity.

use std::collections::HashMap;

use crate::page::domain::NodeId;
use crate::turn::domain::{TurnRecord, TurnRole, TurnState};

/// Registry of every turn sighted during the current observation
/// generation.
///
/// Pure state container: it performs no page access and no I/O, and is
/// mutated only by the observation controller from the single-threaded
/// callback chain. `clear` discards all records wholesale; nothing
/// survives a navigation reset.
#[derive(Debug, Default)]
pub struct TurnRegistry {
    records: HashMap<NodeId, TurnRecord>,
}

impl TurnRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tracked record for a node, when any.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&TurnRecord> {
        self.records.get(&node)
    }

    /// Returns a mutable reference to the tracked record for a node.
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut TurnRecord> {
        self.records.get_mut(&node)
    }

    /// Returns the record for a node, creating a `Discovered` record with
    /// the given role on first sighting.
    pub fn sight(&mut self, node: NodeId, role: TurnRole) -> &mut TurnRecord {
        self.records
            .entry(node)
            .or_insert_with(|| TurnRecord::discovered(node, role))
    }

    /// Returns `true` when the node has already reached `CaptureReady`
    /// this generation; the controller uses this for idempotence before
    /// reclassifying.
    #[must_use]
    pub fn is_capture_ready(&self, node: NodeId) -> bool {
        self.records
            .get(&node)
            .is_some_and(TurnRecord::is_capture_ready)
    }

    /// Returns how many records are in the given state.
    #[must_use]
    pub fn count_in_state(&self, state: TurnState) -> usize {
        self.records
            .values()
            .filter(|record| record.state() == state)
            .count()
    }

    /// Returns the number of tracked records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` when nothing is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Discards every record. Called on navigation reset; no lifecycle
    /// state leaks across generations.
    pub fn clear(&mut self) {
        self.records.clear();
    }
}
