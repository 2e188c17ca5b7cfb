//! Ports for observation-side collaborators.

mod diagnostics;

pub use diagnostics::{DiagnosticEvent, DiagnosticsSink};
