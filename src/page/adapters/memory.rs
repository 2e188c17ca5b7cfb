//! In-memory implementation of the [`PageDom`] port.
//!
//! Provides a thread-safe element tree with structural-selector matching,
//! used by unit and behaviour tests to simulate streaming conversations,
//! attribute flips, and wholesale container replacement without a host
//! runtime. Host embeddings that already hold a materialised tree can use
//! it directly.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::page::domain::{ChainSelector, ElementView, NodeId, Selector, SimplePart};
use crate::page::ports::{DomError, DomResult, MarkerSpec, PageDom};

/// Declarative description of an element for test-tree construction.
#[derive(Debug, Clone, Default)]
pub struct ElementSpec {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    text: String,
}

impl ElementSpec {
    /// Starts a spec for an element with the given tag.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Self::default()
        }
    }

    /// Sets the element id.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Adds a class.
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Adds an attribute.
    #[must_use]
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((name.into(), value.into()));
        self
    }

    /// Sets the element's own text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }
}

#[derive(Debug, Clone)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: BTreeSet<String>,
    attributes: BTreeMap<String, String>,
    own_text: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

impl ElementData {
    fn from_spec(spec: &ElementSpec, parent: Option<NodeId>) -> Self {
        Self {
            tag: spec.tag.to_ascii_lowercase(),
            id: spec.id.clone(),
            classes: spec.classes.iter().cloned().collect(),
            attributes: spec.attributes.iter().cloned().collect(),
            own_text: spec.text.clone(),
            parent,
            children: Vec::new(),
        }
    }

    fn accepts_text_input(&self) -> bool {
        self.tag == "textarea"
            || self.tag == "input"
            || self.attributes.contains_key("contenteditable")
    }
}

impl ElementView for ElementData {
    fn tag_name(&self) -> &str {
        &self.tag
    }

    fn element_id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }
}

#[derive(Debug)]
struct PageState {
    nodes: HashMap<NodeId, ElementData>,
    root: NodeId,
    next_id: u64,
    url: String,
    title: String,
    isolation: bool,
}

impl PageState {
    fn mint(&mut self) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        id
    }

    fn matches_chain(&self, node: NodeId, chain: &ChainSelector) -> bool {
        let Some(data) = self.nodes.get(&node) else {
            return false;
        };
        if !chain.subject().matches(data) {
            return false;
        }
        // Ancestor parts are satisfied innermost-first walking up the
        // parent chain.
        let mut cursor = data.parent;
        for part in chain.ancestors().iter().rev() {
            if !self.walk_up_matching(&mut cursor, part) {
                return false;
            }
        }
        true
    }

    fn walk_up_matching(&self, cursor: &mut Option<NodeId>, part: &SimplePart) -> bool {
        while let Some(current) = *cursor {
            let Some(data) = self.nodes.get(&current) else {
                return false;
            };
            *cursor = data.parent;
            if part.matches(data) {
                return true;
            }
        }
        false
    }

    fn matches_selector(&self, node: NodeId, selector: &Selector) -> bool {
        selector
            .alternatives()
            .iter()
            .any(|chain| self.matches_chain(node, chain))
    }

    fn collect_matches(
        &self,
        scope: NodeId,
        selector: &Selector,
        include_scope: bool,
        out: &mut Vec<NodeId>,
    ) {
        if include_scope && self.matches_selector(scope, selector) {
            out.push(scope);
        }
        let Some(data) = self.nodes.get(&scope) else {
            return;
        };
        for &child in &data.children {
            self.collect_matches(child, selector, true, out);
        }
    }

    fn is_connected(&self, node: NodeId) -> bool {
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == self.root {
                return true;
            }
            match self.nodes.get(&current) {
                Some(data) => cursor = data.parent,
                None => return false,
            }
        }
        false
    }

    fn collect_text(&self, node: NodeId, out: &mut Vec<String>) {
        let Some(data) = self.nodes.get(&node) else {
            return;
        };
        if !data.own_text.is_empty() {
            out.push(data.own_text.clone());
        }
        for &child in &data.children {
            self.collect_text(child, out);
        }
    }

    fn detach(&mut self, node: NodeId) {
        let parent = self.nodes.get(&node).and_then(|data| data.parent);
        if let Some(parent_id) = parent {
            if let Some(parent_data) = self.nodes.get_mut(&parent_id) {
                parent_data.children.retain(|&child| child != node);
            }
        }
        if let Some(data) = self.nodes.get_mut(&node) {
            data.parent = None;
        }
    }
}

/// Thread-safe in-memory page tree implementing [`PageDom`].
#[derive(Debug)]
pub struct InMemoryPage {
    state: RwLock<PageState>,
}

impl InMemoryPage {
    /// Creates a page with an empty `body` root.
    #[must_use]
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        let root = NodeId::from_raw(0);
        let mut nodes = HashMap::new();
        nodes.insert(
            root,
            ElementData::from_spec(&ElementSpec::new("body"), None),
        );
        Self {
            state: RwLock::new(PageState {
                nodes,
                root,
                next_id: 1,
                url: url.into(),
                title: title.into(),
                isolation: true,
            }),
        }
    }

    /// Disables shadow-boundary support, forcing direct rendering.
    #[must_use]
    pub fn without_isolation(self) -> Self {
        self.write().isolation = false;
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, PageState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, PageState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns the root element handle.
    #[must_use]
    pub fn root(&self) -> NodeId {
        self.read().root
    }

    /// Appends a new element under `parent`.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when `parent` does not resolve.
    pub fn append_child(&self, parent: NodeId, spec: &ElementSpec) -> DomResult<NodeId> {
        let mut state = self.write();
        if !state.nodes.contains_key(&parent) {
            return Err(DomError::NodeGone(parent));
        }
        let id = state.mint();
        state
            .nodes
            .insert(id, ElementData::from_spec(spec, Some(parent)));
        if let Some(parent_data) = state.nodes.get_mut(&parent) {
            parent_data.children.push(id);
        }
        Ok(id)
    }

    /// Replaces the element's own text.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when the handle does not resolve.
    pub fn set_text(&self, node: NodeId, text: impl Into<String>) -> DomResult<()> {
        let mut state = self.write();
        let data = state.nodes.get_mut(&node).ok_or(DomError::NodeGone(node))?;
        data.own_text = text.into();
        Ok(())
    }

    /// Appends to the element's own text, simulating a streaming chunk.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when the handle does not resolve.
    pub fn append_text(&self, node: NodeId, chunk: &str) -> DomResult<()> {
        let mut state = self.write();
        let data = state.nodes.get_mut(&node).ok_or(DomError::NodeGone(node))?;
        data.own_text.push_str(chunk);
        Ok(())
    }

    /// Sets an attribute on the element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when the handle does not resolve.
    pub fn set_attribute(
        &self,
        node: NodeId,
        name: impl Into<String>,
        value: impl Into<String>,
    ) -> DomResult<()> {
        let mut state = self.write();
        let data = state.nodes.get_mut(&node).ok_or(DomError::NodeGone(node))?;
        data.attributes.insert(name.into(), value.into());
        Ok(())
    }

    /// Removes an attribute from the element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when the handle does not resolve.
    pub fn remove_attribute(&self, node: NodeId, name: &str) -> DomResult<()> {
        let mut state = self.write();
        let data = state.nodes.get_mut(&node).ok_or(DomError::NodeGone(node))?;
        data.attributes.remove(name);
        Ok(())
    }

    /// Detaches the element (and its subtree) from the page without
    /// forgetting it, mirroring a removed-but-referenced live element.
    ///
    /// # Errors
    ///
    /// Returns [`DomError::NodeGone`] when the handle does not resolve.
    pub fn detach(&self, node: NodeId) -> DomResult<()> {
        let mut state = self.write();
        if !state.nodes.contains_key(&node) {
            return Err(DomError::NodeGone(node));
        }
        state.detach(node);
        Ok(())
    }

    /// Simulates a client-side navigation: the whole tree is replaced by a
    /// fresh empty `body` and the location updated.
    pub fn navigate(&self, url: impl Into<String>, title: impl Into<String>) {
        let mut state = self.write();
        state.nodes.clear();
        let root = NodeId::from_raw(state.next_id);
        state.next_id += 1;
        state
            .nodes
            .insert(root, ElementData::from_spec(&ElementSpec::new("body"), None));
        state.root = root;
        state.url = url.into();
        state.title = title.into();
    }

    /// Returns the stored input value for an element, for test assertions.
    #[must_use]
    pub fn input_value(&self, node: NodeId) -> Option<String> {
        self.read()
            .nodes
            .get(&node)
            .and_then(|data| data.attributes.get("value").cloned())
    }
}

impl PageDom for InMemoryPage {
    fn query(&self, scope: Option<NodeId>, selector: &Selector) -> Option<NodeId> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn query_all(&self, scope: Option<NodeId>, selector: &Selector) -> Vec<NodeId> {
        let state = self.read();
        let start = scope.unwrap_or(state.root);
        let mut out = Vec::new();
        // Scoped queries cover descendants only, matching querySelectorAll.
        state.collect_matches(start, selector, scope.is_none(), &mut out);
        out
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        self.read().matches_selector(node, selector)
    }

    fn closest(&self, node: NodeId, selector: &Selector) -> Option<NodeId> {
        let state = self.read();
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if state.matches_selector(current, selector) {
                return Some(current);
            }
            cursor = state.nodes.get(&current).and_then(|data| data.parent);
        }
        None
    }

    fn contains(&self, ancestor: NodeId, descendant: NodeId) -> bool {
        let state = self.read();
        let mut cursor = Some(descendant);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = state.nodes.get(&current).and_then(|data| data.parent);
        }
        false
    }

    fn is_connected(&self, node: NodeId) -> bool {
        self.read().is_connected(node)
    }

    fn text_content(&self, node: NodeId) -> Option<String> {
        let state = self.read();
        if !state.nodes.contains_key(&node) {
            return None;
        }
        let mut pieces = Vec::new();
        state.collect_text(node, &mut pieces);
        Some(pieces.join(" "))
    }

    fn attribute(&self, node: NodeId, name: &str) -> Option<String> {
        self.read()
            .nodes
            .get(&node)
            .and_then(|data| data.attributes.get(name).cloned())
    }

    fn page_url(&self) -> String {
        self.read().url.clone()
    }

    fn page_title(&self) -> String {
        self.read().title.clone()
    }

    fn supports_isolation(&self) -> bool {
        self.read().isolation
    }

    fn insert_marker(&self, host: NodeId, marker: &MarkerSpec) -> DomResult<NodeId> {
        let mut state = self.write();
        if marker.is_isolated() && !state.isolation {
            return Err(DomError::IsolationUnsupported);
        }
        if !state.nodes.contains_key(&host) {
            return Err(DomError::NodeGone(host));
        }
        let id = state.mint();
        let spec = ElementSpec::new(marker.tag())
            .with_class(marker.class())
            .with_attribute(
                "data-render-mode",
                if marker.is_isolated() {
                    "isolated"
                } else {
                    "direct"
                },
            )
            .with_text(marker.label());
        state.nodes.insert(id, ElementData::from_spec(&spec, Some(host)));
        if let Some(host_data) = state.nodes.get_mut(&host) {
            host_data.children.push(id);
        }
        Ok(id)
    }

    fn remove_node(&self, node: NodeId) -> DomResult<()> {
        let mut state = self.write();
        if !state.nodes.contains_key(&node) {
            return Err(DomError::NodeGone(node));
        }
        state.detach(node);
        state.nodes.remove(&node);
        Ok(())
    }

    fn set_input_value(&self, node: NodeId, value: &str) -> DomResult<()> {
        let mut state = self.write();
        let data = state.nodes.get_mut(&node).ok_or(DomError::NodeGone(node))?;
        if !data.accepts_text_input() {
            return Err(DomError::NotAnInput(node));
        }
        data.attributes.insert("value".to_owned(), value.to_owned());
        Ok(())
    }
}
