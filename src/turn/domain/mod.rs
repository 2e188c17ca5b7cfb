//! Domain model for message-turn lifecycle.

mod error;
mod record;
mod role;
mod state;

pub use error::TurnDomainError;
pub use record::TurnRecord;
pub use role::TurnRole;
pub use state::TurnState;
