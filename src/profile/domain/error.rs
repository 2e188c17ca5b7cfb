//! Domain errors for profile construction and resolution.

use super::Platform;
use crate::page::domain::SelectorParseError;
use thiserror::Error;

/// Errors raised while building profiles or a resolver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileDomainError {
    /// A required profile field was not provided.
    #[error("profile for {platform} is missing required field {field}")]
    MissingField {
        /// The profile being built.
        platform: Platform,
        /// The missing field name.
        field: &'static str,
    },

    /// A selector embedded in a profile failed to parse.
    #[error(transparent)]
    Selector(#[from] SelectorParseError),

    /// A resolver was constructed without any profiles.
    #[error("profile registry is empty")]
    EmptyRegistry,

    /// A resolver was constructed without a generic fallback profile.
    #[error("profile registry has no generic fallback profile")]
    MissingGenericFallback,
}
