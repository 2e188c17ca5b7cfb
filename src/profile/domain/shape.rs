//! The platform profile aggregate and its builder.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{
    CompletionRule, ContentRule, Platform, ProfileDomainError, RoleRule, UrlMatcher,
    rules::DEFAULT_LOADING_INDICATOR,
};
use crate::page::domain::Selector;

/// Complete structural/behavioural ruleset for one chat platform.
///
/// # Invariants
///
/// - Immutable once built: every field is private and only readable
/// - `completion_rule` is always populated (the builder installs the
///   default loading-indicator predicate when none is declared)
/// - Exactly one profile is active per observation session; sessions hold
///   the profile behind an `Arc` and never swap it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformProfile {
    platform: Platform,
    url_matchers: Vec<UrlMatcher>,
    container_selector: Selector,
    message_selector: Selector,
    user_rule: RoleRule,
    agent_rule: RoleRule,
    content_rule: ContentRule,
    streaming: bool,
    completion_rule: CompletionRule,
    settle_delay: Duration,
    watch_container_replacement: bool,
    composer_selector: Selector,
}

impl PlatformProfile {
    /// Starts building a profile for the given platform.
    #[must_use]
    pub fn builder(platform: Platform) -> PlatformProfileBuilder {
        PlatformProfileBuilder::new(platform)
    }

    /// Returns the platform tag.
    #[must_use]
    pub const fn platform(&self) -> Platform {
        self.platform
    }

    /// Returns the ordered URL matcher list.
    #[must_use]
    pub fn url_matchers(&self) -> &[UrlMatcher] {
        &self.url_matchers
    }

    /// Returns `true` when any matcher accepts the URL.
    #[must_use]
    pub fn matches_url(&self, url: &str) -> bool {
        self.url_matchers.iter().any(|rule| rule.matches(url))
    }

    /// Returns the conversation-root locator.
    #[must_use]
    pub const fn container_selector(&self) -> &Selector {
        &self.container_selector
    }

    /// Returns the per-turn locator.
    #[must_use]
    pub const fn message_selector(&self) -> &Selector {
        &self.message_selector
    }

    /// Returns the user-role rule.
    #[must_use]
    pub const fn user_rule(&self) -> &RoleRule {
        &self.user_rule
    }

    /// Returns the agent-role rule.
    #[must_use]
    pub const fn agent_rule(&self) -> &RoleRule {
        &self.agent_rule
    }

    /// Returns the content-extraction rule.
    #[must_use]
    pub const fn content_rule(&self) -> &ContentRule {
        &self.content_rule
    }

    /// Returns whether turns can arrive incomplete and mutate further.
    #[must_use]
    pub const fn streaming(&self) -> bool {
        self.streaming
    }

    /// Returns the completion predicate.
    #[must_use]
    pub const fn completion_rule(&self) -> &CompletionRule {
        &self.completion_rule
    }

    /// Returns the minimum wait after navigation before the first scan.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        self.settle_delay
    }

    /// Returns whether the watchdog observer should watch for wholesale
    /// container replacement.
    #[must_use]
    pub const fn watch_container_replacement(&self) -> bool {
        self.watch_container_replacement
    }

    /// Returns the locator for the page's prompt-composer input, shared
    /// with the text-injection command channel.
    #[must_use]
    pub const fn composer_selector(&self) -> &Selector {
        &self.composer_selector
    }
}

/// Builder enforcing profile completeness before use.
#[derive(Debug, Clone)]
pub struct PlatformProfileBuilder {
    platform: Platform,
    url_matchers: Vec<UrlMatcher>,
    container_selector: Option<Selector>,
    message_selector: Option<Selector>,
    user_rule: Option<RoleRule>,
    agent_rule: Option<RoleRule>,
    content_rule: ContentRule,
    streaming: bool,
    completion_rule: Option<CompletionRule>,
    settle_delay: Duration,
    watch_container_replacement: bool,
    composer_selector: Option<Selector>,
}

impl PlatformProfileBuilder {
    fn new(platform: Platform) -> Self {
        Self {
            platform,
            url_matchers: Vec::new(),
            container_selector: None,
            message_selector: None,
            user_rule: None,
            agent_rule: None,
            content_rule: ContentRule::Subtree,
            streaming: false,
            completion_rule: None,
            settle_delay: Duration::from_millis(500),
            watch_container_replacement: false,
            composer_selector: None,
        }
    }

    /// Appends a URL matcher; order is match priority.
    #[must_use]
    pub fn match_url(mut self, matcher: UrlMatcher) -> Self {
        self.url_matchers.push(matcher);
        self
    }

    /// Sets the conversation-root locator.
    #[must_use]
    pub fn container(mut self, selector: Selector) -> Self {
        self.container_selector = Some(selector);
        self
    }

    /// Sets the per-turn locator.
    #[must_use]
    pub fn message(mut self, selector: Selector) -> Self {
        self.message_selector = Some(selector);
        self
    }

    /// Sets the user-role rule.
    #[must_use]
    pub fn user(mut self, rule: RoleRule) -> Self {
        self.user_rule = Some(rule);
        self
    }

    /// Sets the agent-role rule.
    #[must_use]
    pub fn agent(mut self, rule: RoleRule) -> Self {
        self.agent_rule = Some(rule);
        self
    }

    /// Sets the content-extraction rule (default: whole subtree).
    #[must_use]
    pub fn content(mut self, rule: ContentRule) -> Self {
        self.content_rule = rule;
        self
    }

    /// Marks the platform as streaming its agent turns.
    #[must_use]
    pub const fn streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Declares a custom completion predicate.
    #[must_use]
    pub fn completion(mut self, rule: CompletionRule) -> Self {
        self.completion_rule = Some(rule);
        self
    }

    /// Sets the post-navigation settle delay.
    #[must_use]
    pub const fn settle_delay(mut self, delay: Duration) -> Self {
        self.settle_delay = delay;
        self
    }

    /// Enables the watchdog observer for container replacement.
    #[must_use]
    pub const fn watch_container_replacement(mut self) -> Self {
        self.watch_container_replacement = true;
        self
    }

    /// Sets the prompt-composer locator.
    #[must_use]
    pub fn composer(mut self, selector: Selector) -> Self {
        self.composer_selector = Some(selector);
        self
    }

    /// Builds the immutable profile.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileDomainError::MissingField`] when a required locator
    /// was not provided, or [`ProfileDomainError::Selector`] when the
    /// default loading-indicator locator fails to parse.
    pub fn build(self) -> Result<PlatformProfile, ProfileDomainError> {
        let platform = self.platform;
        let missing = |field| ProfileDomainError::MissingField { platform, field };
        let completion_rule = match self.completion_rule {
            Some(rule) => rule,
            None => CompletionRule::IndicatorAbsent(Selector::parse(DEFAULT_LOADING_INDICATOR)?),
        };
        Ok(PlatformProfile {
            platform,
            url_matchers: self.url_matchers,
            container_selector: self.container_selector.ok_or_else(|| missing("container"))?,
            message_selector: self.message_selector.ok_or_else(|| missing("message"))?,
            user_rule: self.user_rule.ok_or_else(|| missing("user rule"))?,
            agent_rule: self.agent_rule.ok_or_else(|| missing("agent rule"))?,
            content_rule: self.content_rule,
            streaming: self.streaming,
            completion_rule,
            settle_delay: self.settle_delay,
            watch_container_replacement: self.watch_container_replacement,
            composer_selector: self.composer_selector.ok_or_else(|| missing("composer"))?,
        })
    }
}
