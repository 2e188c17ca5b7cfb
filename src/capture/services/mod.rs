//! Capture-side services.

mod handoff;
mod inject;

pub use handoff::{ActivationError, CaptureHandoff};
pub use inject::{InjectError, TextInjector};
