//! Domain model for platform profiles.

mod error;
mod matcher;
mod platform;
mod rules;
mod shape;

pub use error::ProfileDomainError;
pub use matcher::UrlMatcher;
pub use platform::Platform;
pub use rules::{CompletionRule, ContentRule, DEFAULT_LOADING_INDICATOR, RoleRule};
pub use shape::{PlatformProfile, PlatformProfileBuilder};
