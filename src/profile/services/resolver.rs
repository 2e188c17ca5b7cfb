//! Profile selection for the current page URL.

use std::sync::Arc;

use crate::profile::domain::{PlatformProfile, ProfileDomainError};
use crate::profile::registry::builtin_profiles;

/// Outcome of resolving a URL against the profile table.
#[derive(Debug, Clone)]
pub struct ProfileResolution {
    profile: Arc<PlatformProfile>,
    fallback: bool,
}

impl ProfileResolution {
    /// Returns the resolved profile.
    #[must_use]
    pub fn profile(&self) -> Arc<PlatformProfile> {
        Arc::clone(&self.profile)
    }

    /// Returns `true` when only the low-confidence generic profile
    /// matched.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        self.fallback
    }
}

/// Picks the best-matching profile for a URL.
///
/// Resolution is a pure function of the URL: profiles are tried in
/// declaration order, the first whose matcher list accepts the URL wins,
/// and the generic profile is returned when none match. Resolving the
/// same URL twice always yields the same profile.
#[derive(Debug, Clone)]
pub struct ProfileResolver {
    profiles: Vec<Arc<PlatformProfile>>,
    generic: Arc<PlatformProfile>,
}

impl ProfileResolver {
    /// Creates a resolver over an explicit, declaration-ordered profile
    /// table.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::EmptyRegistry`] for an empty table or
    /// [`ProfileDomainError::MissingGenericFallback`] when no profile
    /// carries the generic tag.
    pub fn new(profiles: Vec<PlatformProfile>) -> Result<Self, ProfileDomainError> {
        if profiles.is_empty() {
            return Err(ProfileDomainError::EmptyRegistry);
        }
        let profiles: Vec<Arc<PlatformProfile>> = profiles.into_iter().map(Arc::new).collect();
        let generic = profiles
            .iter()
            .find(|profile| profile.platform().is_generic())
            .cloned()
            .ok_or(ProfileDomainError::MissingGenericFallback)?;
        Ok(Self { profiles, generic })
    }

    /// Creates a resolver over the built-in profile table.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError`] when the built-in table fails to
    /// build.
    pub fn with_builtin() -> Result<Self, ProfileDomainError> {
        Self::new(builtin_profiles()?)
    }

    /// Resolves the profile for a URL. Pure and idempotent.
    #[must_use]
    pub fn resolve(&self, url: &str) -> ProfileResolution {
        self.profiles
            .iter()
            .find(|profile| !profile.platform().is_generic() && profile.matches_url(url))
            .map_or_else(
                || ProfileResolution {
                    profile: Arc::clone(&self.generic),
                    fallback: true,
                },
                |profile| ProfileResolution {
                    profile: Arc::clone(profile),
                    fallback: false,
                },
            )
    }
}
