//! Per-session identity and lifecycle phase.

use crate::profile::domain::PlatformProfile;
use crate::profile::services::ProfileResolution;
use std::fmt;
use std::sync::Arc;
use uuid::Uuid;

/// Unique identifier for one observation session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Generates a new random identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Returns the underlying UUID.
    #[must_use]
    pub const fn value(&self) -> Uuid {
        self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Where the controller is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservationPhase {
    /// Not started.
    Idle,
    /// Looking for the conversation container.
    AwaitingContainer,
    /// Container found, mutations flowing.
    Observing,
    /// Mid-teardown; queued events against the old container are being
    /// discarded.
    Resetting,
}

impl fmt::Display for ObservationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::AwaitingContainer => "awaiting-container",
            Self::Observing => "observing",
            Self::Resetting => "resetting",
        };
        f.write_str(name)
    }
}

/// One observation session: a resolved profile bound to a URL and a
/// generation number.
///
/// Constructed fresh on every start so independent sessions never share
/// state. The generation stamps every timer the session schedules; a
/// stale generation turns the timer's continuation into a no-op.
#[derive(Debug, Clone)]
pub struct ObservationSession {
    id: SessionId,
    generation: u64,
    url: String,
    profile: Arc<PlatformProfile>,
    fallback: bool,
}

impl ObservationSession {
    /// Binds a resolved profile to a URL under the given generation.
    #[must_use]
    pub fn new(generation: u64, url: impl Into<String>, resolution: &ProfileResolution) -> Self {
        Self {
            id: SessionId::generate(),
            generation,
            url: url.into(),
            profile: resolution.profile(),
            fallback: resolution.is_fallback(),
        }
    }

    /// Returns the session identifier.
    #[must_use]
    pub const fn id(&self) -> SessionId {
        self.id
    }

    /// Returns the generation this session runs under.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Returns the URL the session was started against.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the active profile.
    #[must_use]
    pub fn profile(&self) -> Arc<PlatformProfile> {
        Arc::clone(&self.profile)
    }

    /// Returns `true` when the session runs on the generic fallback
    /// profile.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }
}
