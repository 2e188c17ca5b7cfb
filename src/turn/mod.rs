//! Per-message lifecycle tracking.
//!
//! Every distinct turn element the pipeline sights gets one
//! [`domain::TurnRecord`] keyed by its weak node identity in a
//! [`registry::TurnRegistry`]. The record's [`domain::TurnState`] machine
//! (`Discovered → Incomplete → Complete → CaptureReady`) makes transition
//! legality checkable in isolation from real page timing, instead of the
//! ad hoc boolean flags such callback-heavy code tends to grow.

pub mod domain;
pub mod registry;

#[cfg(test)]
mod tests;
