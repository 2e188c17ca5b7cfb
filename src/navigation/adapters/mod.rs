//! Navigation signal sources.

mod channel;
mod scripted;

pub use channel::ChannelNavigationSource;
pub use scripted::ScriptedNavigationSource;
