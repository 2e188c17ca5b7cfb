//! Navigation-side domain types.

mod signal;

pub use signal::{NavigationSignal, NavigationTrigger};
