//! Debounced navigation-to-restart bridging.

use crate::navigation::domain::NavigationSignal;
use crate::navigation::ports::{NavigationSource, ObservationControl};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Collapses bursts of navigation signals into single observation
/// restarts.
///
/// Each signal claims a fresh epoch ticket and waits out the debounce
/// window; a ticket outdated by a newer signal when the window closes is
/// discarded. Only the last signal of a burst restarts observation, and
/// a stale wait that fires after a newer signal has superseded it is a
/// guaranteed no-op.
pub struct NavigationWatcher {
    control: Arc<dyn ObservationControl>,
    debounce: Duration,
    epoch: AtomicU64,
}

impl NavigationWatcher {
    /// Creates a watcher with the given debounce window.
    #[must_use]
    pub fn new(control: Arc<dyn ObservationControl>, debounce: Duration) -> Self {
        Self {
            control,
            debounce,
            epoch: AtomicU64::new(0),
        }
    }

    /// Processes one signal: waits out the debounce window and restarts
    /// observation unless a newer signal arrived meanwhile.
    pub async fn handle_signal(&self, signal: NavigationSignal) {
        let ticket = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.debounce).await;
        if self.epoch.load(Ordering::SeqCst) == ticket {
            self.control.restart(signal.url()).await;
        }
    }

    /// Drains a source until it ends, debouncing every signal. Each
    /// signal is handled on its own task so a long debounce never blocks
    /// the drain loop.
    pub async fn run(self: Arc<Self>, source: Arc<dyn NavigationSource>) {
        while let Some(signal) = source.next_signal().await {
            let watcher = Arc::clone(&self);
            tokio::spawn(async move {
                watcher.handle_signal(signal).await;
            });
        }
    }
}
