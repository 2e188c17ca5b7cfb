//! The observation controller and its supporting machinery.
//!
//! This is the heart of the pipeline: a single-threaded, event-driven
//! state machine that resolves a platform profile, finds the conversation
//! container, scans pre-existing turns, consumes mutation batches from the
//! host, and drives every tracked turn through its lifecycle until it is
//! offered for capture exactly once.
//!
//! - Session/config domain types and the controller in [`services`]
//! - The diagnostics port in [`ports`]
//! - Log-based and recording diagnostics adapters in [`adapters`]

pub mod adapters;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
