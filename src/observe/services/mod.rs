//! Observation services.

mod classify;
mod config;
mod controller;
mod extract;
mod session;

pub use classify::{classify_role, completion_met};
pub use config::ObservationConfig;
pub use controller::ObservationController;
pub use extract::{extract_text, normalize};
pub use session::{ObservationPhase, ObservationSession, SessionId};
