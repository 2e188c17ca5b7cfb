//! Ports for capture-side collaborators.

mod render;
mod sink;

pub use render::{ActivationGuard, AffordanceHandle, RenderBoundary, RenderError, RenderMode};
pub use sink::{CaptureSink, CaptureSinkError, SaveReceipt, SinkResult};
