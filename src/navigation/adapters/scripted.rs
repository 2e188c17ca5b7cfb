//! Pre-scripted navigation source for tests.

use crate::navigation::domain::NavigationSignal;
use crate::navigation::ports::NavigationSource;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, PoisonError};

/// A [`NavigationSource`] that replays a fixed sequence of signals and
/// then ends.
#[derive(Debug, Default)]
pub struct ScriptedNavigationSource {
    signals: Mutex<VecDeque<NavigationSignal>>,
}

impl ScriptedNavigationSource {
    /// Creates a source that will replay `signals` in order.
    #[must_use]
    pub fn new(signals: impl IntoIterator<Item = NavigationSignal>) -> Self {
        Self {
            signals: Mutex::new(signals.into_iter().collect()),
        }
    }
}

#[async_trait]
impl NavigationSource for ScriptedNavigationSource {
    async fn next_signal(&self) -> Option<NavigationSignal> {
        self.signals
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }
}
