//! Raw navigation signals as delivered by the host.

use std::fmt;

/// What produced a navigation signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTrigger {
    /// A history push (new route).
    HistoryPush,
    /// A history replace (same entry, new URL).
    HistoryReplace,
    /// Back/forward traversal.
    PopState,
    /// A URL change noticed by polling; the fallback for platforms that
    /// bypass the history hooks.
    UrlChange,
}

impl fmt::Display for NavigationTrigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HistoryPush => "history-push",
            Self::HistoryReplace => "history-replace",
            Self::PopState => "pop-state",
            Self::UrlChange => "url-change",
        };
        f.write_str(name)
    }
}

/// One observed route change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationSignal {
    url: String,
    trigger: NavigationTrigger,
}

impl NavigationSignal {
    /// Creates a signal for the given destination URL.
    #[must_use]
    pub fn new(url: impl Into<String>, trigger: NavigationTrigger) -> Self {
        Self {
            url: url.into(),
            trigger,
        }
    }

    /// Returns the destination URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns what produced the signal.
    #[must_use]
    pub const fn trigger(&self) -> NavigationTrigger {
        self.trigger
    }
}
