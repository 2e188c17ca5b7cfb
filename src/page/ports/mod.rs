//! Port through which the pipeline reads and minimally writes the page.

use crate::page::domain::{NodeId, Selector};
use thiserror::Error;

/// Result type for page-mutating operations.
pub type DomResult<T> = Result<T, DomError>;

/// Description of an affordance marker element to insert next to a turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerSpec {
    tag: String,
    class: String,
    label: String,
    isolated: bool,
}

impl MarkerSpec {
    /// Creates a marker description.
    #[must_use]
    pub fn new(tag: impl Into<String>, class: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            class: class.into(),
            label: label.into(),
            isolated: false,
        }
    }

    /// Requests style-encapsulated insertion (shadow boundary).
    #[must_use]
    pub fn isolated(mut self) -> Self {
        self.isolated = true;
        self
    }

    /// Returns the marker tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Returns the marker class.
    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }

    /// Returns the marker's visible label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns whether style-encapsulated insertion was requested.
    #[must_use]
    pub const fn is_isolated(&self) -> bool {
        self.isolated
    }
}

/// Read/write access to the live page tree.
///
/// The pipeline drives all page interaction through this port so that the
/// observation logic stays independent of the host runtime. Reads are
/// plain lookups; the only writes are affordance-marker insertion and
/// composer-input injection.
pub trait PageDom: Send + Sync {
    /// Finds the first element matching `selector`, searched in document
    /// order under `scope` (or the whole page when `scope` is `None`).
    fn query(&self, scope: Option<NodeId>, selector: &Selector) -> Option<NodeId>;

    /// Finds every element matching `selector` under `scope` in document
    /// order.
    fn query_all(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId>;

    /// Returns `true` when the element itself matches `selector`.
    fn matches(&self, node: NodeId, selector: &Selector) -> bool;

    /// Returns the nearest ancestor-or-self of `node` matching `selector`.
    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId>;

    /// Returns `true` when `descendant` lies in the subtree of `ancestor`.
    fn contains(&self, ancestor: NodeId, descendant: NodeId) -> bool;

    /// Returns `true` when the element is still attached to the page.
    fn is_connected(&self, node: NodeId) -> bool;

    /// Returns the concatenated text of the element's subtree, or `None`
    /// when the handle no longer resolves.
    fn text_content(&self, node: NodeId) -> Option<String>;

    /// Returns the value of the named attribute on the element.
    fn attribute(&self, node: NodeId, name: &str) -> Option<String>;

    /// Returns the page's current URL.
    fn page_url(&self) -> String;

    /// Returns the page's current title.
    fn page_title(&self) -> String;

    /// Returns `true` when the page supports style-encapsulated marker
    /// insertion (shadow boundaries).
    fn supports_isolation(&self) -> bool;

    /// Inserts an affordance marker adjacent to `host`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when `host` no longer resolves, or
    /// [`DomError::IsolationUnsupported`] when the marker requests
    /// isolation the page cannot provide.
    fn insert_marker(&self, host: NodeId, marker: &MarkerSpec) -> DomResult<NodeId>;

    /// Removes a previously inserted marker element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when the marker no longer resolves.
    fn remove_node(&self, node: NodeId) -> DomResult<()>;

    /// Writes `value` into an input element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when the input no longer resolves or
    /// [`DomError::NotAnInput`] when the element cannot accept text.
    fn set_input_value(&self, node: NodeId, value: &str) -> DomResult<()>;
}

/// Errors surfaced by page-mutating operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomError {
    /// The handle no longer resolves to a live element.
    #[error("element no longer present: {0}")]
    NodeGone(NodeId),

    /// Style-encapsulated insertion was requested but is unavailable.
    #[error("page does not support isolated marker insertion")]
    IsolationUnsupported,

    /// The element cannot accept injected text.
    #[error("element is not a text input: {0}")]
    NotAnInput(NodeId),
}
