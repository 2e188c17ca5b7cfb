//! In-memory capture sink used by tests and demos.

use crate::capture::domain::MessageSnapshot;
use crate::capture::ports::{CaptureSink, CaptureSinkError, SaveReceipt, SinkResult};
use async_trait::async_trait;
use std::sync::{Mutex, PoisonError};

/// A [`CaptureSink`] that records every snapshot it is offered.
///
/// Can be switched into a failing mode to exercise the pipeline's
/// degraded paths.
#[derive(Debug, Default)]
pub struct RecordingCaptureSink {
    saved: Mutex<Vec<MessageSnapshot>>,
    failure: Mutex<Option<String>>,
}

impl RecordingCaptureSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent save fail with the given reason.
    pub fn fail_with(&self, reason: impl Into<String>) {
        *self.lock_failure() = Some(reason.into());
    }

    /// Restores normal operation after [`Self::fail_with`].
    pub fn recover(&self) {
        *self.lock_failure() = None;
    }

    /// Returns copies of every snapshot saved so far.
    #[must_use]
    pub fn saved(&self) -> Vec<MessageSnapshot> {
        self.lock_saved().clone()
    }

    /// Returns how many snapshots were saved.
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.lock_saved().len()
    }

    fn lock_saved(&self) -> std::sync::MutexGuard<'_, Vec<MessageSnapshot>> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_failure(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        self.failure.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl CaptureSink for RecordingCaptureSink {
    async fn save(&self, snapshot: &MessageSnapshot) -> SinkResult<SaveReceipt> {
        if let Some(reason) = self.lock_failure().clone() {
            return Err(CaptureSinkError::Unavailable { reason });
        }
        let mut saved = self.lock_saved();
        saved.push(snapshot.clone());
        Ok(SaveReceipt::with_id(format!("mem-{}", saved.len())))
    }
}
