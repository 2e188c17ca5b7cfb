//! Profile resolution services.

mod resolver;

pub use resolver::{ProfileResolution, ProfileResolver};
