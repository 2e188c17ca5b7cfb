//! Affordance renderers: isolated boundary first, direct fallback.

use crate::capture::ports::{AffordanceHandle, RenderBoundary, RenderError, RenderMode};
use crate::page::domain::{NodeId, Selector, SelectorParseError};
use crate::page::ports::{DomError, MarkerSpec, PageDom};
use std::sync::Arc;

/// Class carried by every inserted affordance marker.
pub const AFFORDANCE_CLASS: &str = "turnscribe-capture";

const AFFORDANCE_TAG: &str = "span";
const AFFORDANCE_LABEL: &str = "Capture";

/// Renders the affordance inside a style-isolation boundary.
#[derive(Debug)]
pub struct ShadowAffordanceRenderer {
    spec: MarkerSpec,
    existing: Selector,
}

impl ShadowAffordanceRenderer {
    /// Creates the renderer.
    ///
    /// # Errors
    ///
    /// Returns a parse error only if the affordance class constant is
    /// malformed, which would be a programming error.
    pub fn new() -> Result<Self, SelectorParseError> {
        Ok(Self {
            spec: MarkerSpec::new(AFFORDANCE_TAG, AFFORDANCE_CLASS, AFFORDANCE_LABEL).isolated(),
            existing: existing_marker_selector()?,
        })
    }
}

impl RenderBoundary for ShadowAffordanceRenderer {
    fn render(&self, dom: &dyn PageDom, host: NodeId) -> Result<AffordanceHandle, RenderError> {
        mount(dom, host, &self.spec, &self.existing, RenderMode::Isolated)
    }

    fn mode(&self) -> RenderMode {
        RenderMode::Isolated
    }
}

/// Renders the affordance directly in the page tree.
///
/// Fallback for pages without isolation support; page styles may affect
/// the affordance's appearance but not its behaviour.
#[derive(Debug)]
pub struct DirectAffordanceRenderer {
    spec: MarkerSpec,
    existing: Selector,
}

impl DirectAffordanceRenderer {
    /// Creates the renderer.
    ///
    /// # Errors
    ///
    /// Returns a parse error only if the affordance class constant is
    /// malformed, which would be a programming error.
    pub fn new() -> Result<Self, SelectorParseError> {
        Ok(Self {
            spec: MarkerSpec::new(AFFORDANCE_TAG, AFFORDANCE_CLASS, AFFORDANCE_LABEL),
            existing: existing_marker_selector()?,
        })
    }
}

impl RenderBoundary for DirectAffordanceRenderer {
    fn render(&self, dom: &dyn PageDom, host: NodeId) -> Result<AffordanceHandle, RenderError> {
        mount(dom, host, &self.spec, &self.existing, RenderMode::Direct)
    }

    fn mode(&self) -> RenderMode {
        RenderMode::Direct
    }
}

/// Picks a renderer for the page: isolated when the page supports it,
/// direct otherwise.
///
/// # Errors
///
/// Propagates renderer construction failure.
pub fn boundary_for(dom: &dyn PageDom) -> Result<Arc<dyn RenderBoundary>, SelectorParseError> {
    if dom.supports_isolation() {
        Ok(Arc::new(ShadowAffordanceRenderer::new()?))
    } else {
        Ok(Arc::new(DirectAffordanceRenderer::new()?))
    }
}

fn existing_marker_selector() -> Result<Selector, SelectorParseError> {
    Selector::parse(&format!(".{AFFORDANCE_CLASS}"))
}

fn mount(
    dom: &dyn PageDom,
    host: NodeId,
    spec: &MarkerSpec,
    existing: &Selector,
    mode: RenderMode,
) -> Result<AffordanceHandle, RenderError> {
    if !dom.is_connected(host) {
        return Err(RenderError::Dom(DomError::NodeGone(host)));
    }
    if dom.query(Some(host), existing).is_some() {
        return Err(RenderError::AlreadyRendered(host));
    }
    let marker = dom.insert_marker(host, spec)?;
    Ok(AffordanceHandle::new(host, marker, mode))
}
