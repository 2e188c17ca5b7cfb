//! Injection of text into the platform's composer input.

use crate::page::domain::NodeId;
use crate::page::ports::{DomError, PageDom};
use crate::profile::domain::PlatformProfile;
use std::sync::Arc;
use thiserror::Error;

/// Errors surfaced while injecting composer text.
#[derive(Debug, Error)]
pub enum InjectError {
    /// The profile's composer selector matched nothing.
    #[error("composer input not found")]
    ComposerNotFound,
    /// The underlying page operation failed.
    #[error(transparent)]
    Dom(#[from] DomError),
}

/// Writes text into the active platform's composer input.
///
/// Used by hosts that want a "quote into reply" flow: find the composer
/// through the profile's selector and set its value. The pipeline never
/// submits the composer.
pub struct TextInjector {
    dom: Arc<dyn PageDom>,
}

impl TextInjector {
    /// Wires the injector to the page.
    #[must_use]
    pub fn new(dom: Arc<dyn PageDom>) -> Self {
        Self { dom }
    }

    /// Injects `value` into the composer named by `profile`, returning
    /// the composer node written to.
    ///
    /// # Errors
    ///
    /// Returns [`InjectError::ComposerNotFound`] when the selector
    /// matches nothing, or a [`DomError`] when the element cannot accept
    /// text.
    pub fn inject(&self, profile: &PlatformProfile, value: &str) -> Result<NodeId, InjectError> {
        let composer = self
            .dom
            .query(None, profile.composer_selector())
            .ok_or(InjectError::ComposerNotFound)?;
        self.dom.set_input_value(composer, value)?;
        Ok(composer)
    }
}
