//! Adapter implementations of the page ports.

pub mod memory;

pub use memory::{ElementSpec, InMemoryPage};
