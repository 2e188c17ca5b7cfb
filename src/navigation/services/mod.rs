//! Navigation-side services.

mod watcher;

pub use watcher::NavigationWatcher;
