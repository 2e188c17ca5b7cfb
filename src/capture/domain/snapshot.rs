//! Immutable snapshots of captured conversation turns.

use crate::profile::domain::Platform;
use crate::turn::domain::TurnRole;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a [`MessageSnapshot`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SnapshotId(Uuid);

impl SnapshotId {
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

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// An immutable record of one captured turn.
///
/// Snapshots are value objects: once built they are never mutated, and
/// later changes to the page have no effect on a snapshot already handed
/// to the persistence collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageSnapshot {
    id: SnapshotId,
    text: String,
    role: TurnRole,
    platform: Platform,
    source_url: String,
    page_title: String,
    observed_at: DateTime<Utc>,
    fingerprint: String,
}

impl MessageSnapshot {
    /// Builds a snapshot of the given text, stamping the observation time
    /// from the injected clock and deriving a content fingerprint from
    /// the text and source URL.
    #[must_use]
    pub fn new(
        text: impl Into<String>,
        role: TurnRole,
        platform: Platform,
        source_url: impl Into<String>,
        page_title: impl Into<String>,
        clock: &impl Clock,
    ) -> Self {
        let body = text.into();
        let url = source_url.into();
        let fingerprint = fingerprint_of(&body, &url);
        Self {
            id: SnapshotId::generate(),
            text: body,
            role,
            platform,
            source_url: url,
            page_title: page_title.into(),
            observed_at: clock.utc(),
            fingerprint,
        }
    }

    /// Returns the snapshot identifier.
    #[must_use]
    pub const fn id(&self) -> SnapshotId {
        self.id
    }

    /// Returns the captured text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the role of the captured turn.
    #[must_use]
    pub const fn role(&self) -> TurnRole {
        self.role
    }

    /// Returns the platform the turn was captured from.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the page URL at capture time.
    #[must_use]
    pub fn source_url(&self) -> &str {
        &self.source_url
    }

    /// Returns the page title at capture time.
    #[must_use]
    pub fn page_title(&self) -> &str {
        &self.page_title
    }

    /// Returns when the snapshot was taken.
    #[must_use]
    pub const fn observed_at(&self) -> DateTime<Utc> {
        self.observed_at
    }

    /// Returns the content fingerprint, a hex-encoded SHA-256 digest of
    /// the text and source URL. Two snapshots of identical content on
    /// the same page share a fingerprint even though their identifiers
    /// differ.
    #[must_use]
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }
}

fn fingerprint_of(text: &str, source_url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    hasher.update([0]);
    hasher.update(source_url.as_bytes());
    hasher
        .finalize()
        .iter()
        .map(|byte| format!("{byte:02x}"))
        .collect()
}
