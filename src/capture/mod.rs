//! Capture hand-off: snapshots, persistence, and the capture affordance.
//!
//! Once a turn reaches its terminal lifecycle state, this context builds
//! an immutable snapshot of it, offers the snapshot to the persistence
//! collaborator exactly once, and renders a capture affordance beside the
//! turn through a style-isolated boundary when the page supports one.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
