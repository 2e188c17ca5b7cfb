//! Capture-side domain types.

mod snapshot;

pub use snapshot::{MessageSnapshot, SnapshotId};
