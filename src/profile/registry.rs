//! Built-in profile table.
//!
//! Profiles are declared in match-priority order; the generic fallback is
//! declared last and carries no URL matchers so the resolver only reaches
//! it when nothing else matched.

use std::time::Duration;

use crate::page::domain::Selector;
use crate::profile::domain::{
    CompletionRule, ContentRule, Platform, PlatformProfile, ProfileDomainError, RoleRule,
    UrlMatcher,
};

/// Builds the built-in, declaration-ordered profile table.
///
/// # Errors
///
/// Returns [`ProfileDomainError`] when a built-in selector fails to parse;
/// this indicates a defect in the table itself.
pub fn builtin_profiles() -> Result<Vec<PlatformProfile>, ProfileDomainError> {
    Ok(vec![
        chatgpt()?,
        claude()?,
        gemini()?,
        deepseek()?,
        grok()?,
        generic()?,
    ])
}

fn sel(source: &str) -> Result<Selector, ProfileDomainError> {
    Ok(Selector::parse(source)?)
}

fn chatgpt() -> Result<PlatformProfile, ProfileDomainError> {
    PlatformProfile::builder(Platform::ChatGpt)
        .match_url(UrlMatcher::Substring("chatgpt.com".to_owned()))
        .match_url(UrlMatcher::Substring("chat.openai.com".to_owned()))
        .container(sel("main")?)
        .message(sel("div[data-message-author-role]")?)
        .user(RoleRule::new(sel("[data-message-author-role=user]")?))
        .agent(RoleRule::new(sel("[data-message-author-role=assistant]")?))
        .content(ContentRule::FirstMatch(sel(".markdown, .whitespace-pre-wrap")?))
        .streaming(true)
        .completion(CompletionRule::IndicatorAbsent(sel(".result-streaming")?))
        .settle_delay(Duration::from_millis(800))
        .watch_container_replacement()
        .composer(sel("#prompt-textarea")?)
        .build()
}

fn claude() -> Result<PlatformProfile, ProfileDomainError> {
    PlatformProfile::builder(Platform::Claude)
        .match_url(UrlMatcher::Substring("claude.ai".to_owned()))
        .container(sel("main")?)
        .message(sel("div[data-testid=user-message], div.font-claude-message")?)
        .user(RoleRule::new(sel("[data-testid=user-message]")?))
        .agent(RoleRule::new(sel(".font-claude-message")?))
        .content(ContentRule::JoinAll {
            selector: sel("p, pre, li")?,
            separator: "\n".to_owned(),
        })
        .streaming(true)
        .completion(CompletionRule::AttributeMissing {
            name: "data-is-streaming".to_owned(),
        })
        .settle_delay(Duration::from_millis(1000))
        .watch_container_replacement()
        .composer(sel("div[contenteditable=true]")?)
        .build()
}

fn gemini() -> Result<PlatformProfile, ProfileDomainError> {
    PlatformProfile::builder(Platform::Gemini)
        .match_url(UrlMatcher::Substring("gemini.google.com".to_owned()))
        .container(sel("chat-window")?)
        .message(sel("user-query, model-response")?)
        .user(RoleRule::new(sel("user-query")?))
        .agent(RoleRule::new(sel("model-response")?))
        .content(ContentRule::FirstMatch(sel("message-content, .markdown")?))
        .streaming(true)
        .completion(CompletionRule::IndicatorAbsent(sel("blinking-cursor, .loading-indicator")?))
        .settle_delay(Duration::from_millis(1200))
        .watch_container_replacement()
        .composer(sel("rich-textarea div[contenteditable=true]")?)
        .build()
}

fn deepseek() -> Result<PlatformProfile, ProfileDomainError> {
    PlatformProfile::builder(Platform::DeepSeek)
        .match_url(UrlMatcher::Substring("chat.deepseek.com".to_owned()))
        .container(sel(".chat-container, main")?)
        .message(sel(".chat-message")?)
        .user(RoleRule::new(sel(".chat-message.user, [data-role=user]")?))
        .agent(
            RoleRule::new(sel(".chat-message.assistant, [data-role=assistant]")?)
                .with_action_bar(sel(".message-actions")?),
        )
        .content(ContentRule::FirstMatch(sel(".markdown-body")?))
        .streaming(true)
        .settle_delay(Duration::from_millis(900))
        .watch_container_replacement()
        .composer(sel("textarea")?)
        .build()
}

fn grok() -> Result<PlatformProfile, ProfileDomainError> {
    PlatformProfile::builder(Platform::Grok)
        .match_url(UrlMatcher::Substring("grok.com".to_owned()))
        .match_url(UrlMatcher::Glob("https://*x.com/i/grok*".to_owned()))
        .container(sel("main")?)
        .message(sel("div.message-bubble")?)
        .user(RoleRule::new(sel(".message-bubble.items-end, [data-sender=user]")?))
        .agent(
            RoleRule::new(sel("[data-sender=assistant]")?)
                .with_action_bar(sel(".action-buttons")?),
        )
        .streaming(true)
        .settle_delay(Duration::from_millis(800))
        .composer(sel("textarea")?)
        .build()
}

fn generic() -> Result<PlatformProfile, ProfileDomainError> {
    PlatformProfile::builder(Platform::Generic)
        .container(sel("main, body")?)
        .message(sel(".message, .chat-message, .turn")?)
        .user(RoleRule::new(sel(".user, [data-role=user]")?))
        .agent(RoleRule::new(sel(".assistant, .agent, [data-role=assistant]")?))
        .settle_delay(Duration::from_millis(1500))
        .composer(sel("textarea, div[contenteditable=true]")?)
        .build()
}
