//! Capture-side adapters: an in-memory sink and the affordance renderers.

mod memory;
mod renderer;

pub use memory::RecordingCaptureSink;
pub use renderer::{
    AFFORDANCE_CLASS, DirectAffordanceRenderer, ShadowAffordanceRenderer, boundary_for,
};
