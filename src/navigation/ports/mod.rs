//! Ports for navigation-side collaborators.

use crate::navigation::domain::NavigationSignal;
use async_trait::async_trait;

/// Stream of navigation signals from the host.
#[async_trait]
pub trait NavigationSource: Send + Sync {
    /// Waits for the next signal. `None` means the source is exhausted
    /// and the watcher should stop.
    async fn next_signal(&self) -> Option<NavigationSignal>;
}

/// The slice of the observation controller the watcher may drive.
///
/// Narrow on purpose: navigation recovery can restart observation and
/// nothing else.
#[async_trait]
pub trait ObservationControl: Send + Sync {
    /// Tears down the current session and starts a fresh one against the
    /// given URL.
    async fn restart(&self, url: &str);
}
