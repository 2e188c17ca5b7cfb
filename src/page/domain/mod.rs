//! Domain types for the page-tree boundary.

mod mutation;
mod node;
mod selector;

pub use mutation::{MutationBatch, MutationKind, MutationRecord, ObserveOptions};
pub use node::NodeId;
pub use selector::{
    AttributePredicate, ChainSelector, ElementView, Selector, SelectorParseError, SimplePart,
};
