//! Turnscribe: conversation observation and message-lifecycle pipeline.
//!
//! Turnscribe watches a third-party, script-rendered chat conversation
//! embedded in a host page, identifies message turns as they appear and
//! finish streaming, classifies each as user- or agent-authored, extracts
//! clean text, and offers each turn for capture exactly once, while the
//! host page's structure varies between platforms and may be replaced
//! wholesale by client-side navigation at any time.
//!
//! # Architecture
//!
//! The crate follows hexagonal architecture principles:
//!
//! - **Domain**: Pure pipeline types with no host-runtime dependencies
//! - **Ports**: Abstract trait interfaces for the page tree, persistence,
//!   navigation signals, and diagnostics
//! - **Adapters**: Concrete implementations (in-memory page, channel-backed
//!   navigation, log-based diagnostics)
//!
//! # Modules
//!
//! - [`page`]: Opaque page-tree boundary: node identity, structural
//!   selectors, mutation records, and the [`page::ports::PageDom`] port
//! - [`profile`]: Per-platform structural rulesets and the resolver that
//!   picks one for the current URL
//! - [`turn`]: Per-message lifecycle state machine and registry
//! - [`observe`]: The observation controller driving discovery,
//!   classification, and completion tracking
//! - [`capture`]: Snapshot construction, the persistence hand-off boundary,
//!   and isolated affordance rendering
//! - [`navigation`]: Debounced recovery from single-page-app navigation

pub mod capture;
pub mod navigation;
pub mod observe;
pub mod page;
pub mod profile;
pub mod turn;
