//! Navigation recovery for single-page-application route changes.
//!
//! Conversation platforms swap conversations without a page load. This
//! context turns raw navigation signals (history hooks, URL polling)
//! into debounced observation restarts, so a burst of rapid route
//! changes costs one teardown and one fresh start.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
