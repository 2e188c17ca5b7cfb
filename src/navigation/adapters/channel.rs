//! Channel-backed navigation source for live hosts.

use crate::navigation::domain::NavigationSignal;
use crate::navigation::ports::NavigationSource;
use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};

/// A [`NavigationSource`] fed through a bounded channel.
///
/// The host's history hooks and URL poller send into the channel; the
/// watcher drains it. Dropping the sender ends the stream.
pub struct ChannelNavigationSource {
    receiver: Mutex<mpsc::Receiver<NavigationSignal>>,
}

impl ChannelNavigationSource {
    /// Creates a source and the sender that feeds it.
    #[must_use]
    pub fn channel(capacity: usize) -> (mpsc::Sender<NavigationSignal>, Self) {
        let (sender, receiver) = mpsc::channel(capacity);
        (
            sender,
            Self {
                receiver: Mutex::new(receiver),
            },
        )
    }
}

#[async_trait]
impl NavigationSource for ChannelNavigationSource {
    async fn next_signal(&self) -> Option<NavigationSignal> {
        self.receiver.lock().await.recv().await
    }
}
