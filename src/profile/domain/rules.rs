//! Structural rules for classifying turns and extracting their content.
//!
//! Rules are declarative; evaluating them against a live page is the
//! observation controller's job.

use crate::page::domain::Selector;
use serde::{Deserialize, Serialize};

/// Locator used to decide whether a turn belongs to a role.
///
/// A turn matches when the turn element itself satisfies `selector`, or,
/// for platforms that only distinguish roles by their action bar, when
/// the optional `action_bar` locator matches inside the turn's subtree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRule {
    selector: Selector,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    action_bar: Option<Selector>,
}

impl RoleRule {
    /// Creates a rule matching the turn element directly.
    #[must_use]
    pub const fn new(selector: Selector) -> Self {
        Self {
            selector,
            action_bar: None,
        }
    }

    /// Adds an action-bar locator checked inside the turn's subtree.
    #[must_use]
    pub fn with_action_bar(mut self, action_bar: Selector) -> Self {
        self.action_bar = Some(action_bar);
        self
    }

    /// Returns the turn-element selector.
    #[must_use]
    pub const fn selector(&self) -> &Selector {
        &self.selector
    }

    /// Returns the optional action-bar locator.
    #[must_use]
    pub const fn action_bar(&self) -> Option<&Selector> {
        self.action_bar.as_ref()
    }
}

/// How the human-readable text of a turn is located.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentRule {
    /// Use the whole turn subtree's text.
    Subtree,
    /// Use the text of the first element matching the selector, falling
    /// back to the whole subtree when nothing matches.
    FirstMatch(Selector),
    /// Concatenate the text of every matching element with a separator;
    /// the custom-extraction strategy for platforms that fragment a turn
    /// into blocks.
    JoinAll {
        /// Block selector.
        selector: Selector,
        /// Separator placed between block texts.
        separator: String,
    },
}

/// Predicate deciding whether a streaming turn has finished.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionRule {
    /// Complete when no loading-indicator element is present within the
    /// turn's subtree. This is the default predicate.
    IndicatorAbsent(Selector),
    /// Complete when the turn does not carry the named attribute.
    AttributeMissing {
        /// Attribute whose presence marks the turn as still streaming.
        name: String,
    },
    /// Complete when the turn carries the named attribute with the value.
    AttributeEquals {
        /// Attribute name.
        name: String,
        /// Value marking completion.
        value: String,
    },
}

/// Default loading-indicator locator used when a profile declares no
/// custom completion rule.
pub const DEFAULT_LOADING_INDICATOR: &str =
    ".result-streaming, .loading, [aria-busy=true], [data-streaming]";
