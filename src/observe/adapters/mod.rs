//! Diagnostics adapters.

mod diagnostics;

pub use diagnostics::{LogDiagnostics, RecordingDiagnostics};
