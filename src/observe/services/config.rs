//! Tunable observation constants.
//!
//! The thresholds here are tuning choices, not correctness requirements,
//! so they are carried as configuration rather than hard-coded.

use std::time::Duration;

/// Tunables for one observation controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservationConfig {
    /// Minimum normalized text length (in characters) before a complete
    /// turn is promoted to capture-ready. Keeps stray fragments out of
    /// the capture stream.
    pub capture_threshold: usize,
    /// How many times to look for the conversation container before
    /// reporting it missing.
    pub container_retry_limit: u32,
    /// Pause between container lookups.
    pub container_retry_interval: Duration,
    /// Attributes the primary observer watches. Platforms signal role
    /// and completion through these.
    pub observed_attributes: Vec<String>,
}

impl Default for ObservationConfig {
    fn default() -> Self {
        Self {
            capture_threshold: 20,
            container_retry_limit: 10,
            container_retry_interval: Duration::from_millis(500),
            observed_attributes: vec![
                "class".to_owned(),
                "aria-busy".to_owned(),
                "data-message-author-role".to_owned(),
                "data-is-streaming".to_owned(),
                "data-streaming".to_owned(),
            ],
        }
    }
}

impl ObservationConfig {
    /// Overrides the capture threshold.
    #[must_use]
    pub const fn with_capture_threshold(mut self, threshold: usize) -> Self {
        self.capture_threshold = threshold;
        self
    }

    /// Overrides the container retry budget.
    #[must_use]
    pub const fn with_container_retries(mut self, limit: u32, interval: Duration) -> Self {
        self.container_retry_limit = limit;
        self.container_retry_interval = interval;
        self
    }
}
