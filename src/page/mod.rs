//! Opaque page-tree boundary.
//!
//! The pipeline never parses host markup semantically; it sees the page as
//! an opaque, mutating tree of elements addressed by weak-identity handles
//! and matched only through configurable structural rules. This module
//! defines that boundary:
//!
//! - Domain types in [`domain`]: [`domain::NodeId`], [`domain::Selector`],
//!   mutation records
//! - The [`ports::PageDom`] port the controller drives the page through
//! - The [`adapters::memory::InMemoryPage`] adapter used by tests and
//!   host embeddings

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
mod tests;
