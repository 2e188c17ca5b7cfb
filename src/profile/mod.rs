//! Per-platform structural rulesets and profile resolution.
//!
//! A profile is the complete structural/behavioural description of one
//! supported chat platform: where the conversation lives, what a turn
//! looks like, how roles are told apart, how completion is signalled, and
//! how long the site needs to settle after navigation. Profiles are plain
//! declarative data; evaluation against a live page happens in
//! [`crate::observe`].
//!
//! - Domain types in [`domain`]
//! - The built-in profile table in [`registry`]
//! - [`services::ProfileResolver`] picks the profile for a URL

pub mod domain;
pub mod registry;
pub mod services;

#[cfg(test)]
mod tests;
