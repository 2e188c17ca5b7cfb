//! Tests for profile domain types and the built-in table.

use std::time::Duration;

use crate::page::domain::Selector;
use crate::profile::domain::{
    CompletionRule, Platform, PlatformProfile, ProfileDomainError, RoleRule, UrlMatcher,
};
use crate::profile::registry::builtin_profiles;
use rstest::rstest;

#[rstest]
#[case("https://chatgpt.com/c/123", "chatgpt.com", true)]
#[case("https://example.com", "chatgpt.com", false)]
fn substring_matcher(#[case] url: &str, #[case] fragment: &str, #[case] expected: bool) {
    let matcher = UrlMatcher::Substring(fragment.to_owned());
    assert_eq!(matcher.matches(url), expected);
}

#[rstest]
#[case("https://x.com/i/grok?x=1", "https://*x.com/i/grok*", true)]
#[case("https://www.x.com/i/grok", "https://*x.com/i/grok*", true)]
#[case("https://x.com/home", "https://*x.com/i/grok*", false)]
#[case("abc", "a*c", true)]
#[case("ac", "a*c", true)]
#[case("ab", "a*c", false)]
fn glob_matcher(#[case] url: &str, #[case] pattern: &str, #[case] expected: bool) {
    let matcher = UrlMatcher::Glob(pattern.to_owned());
    assert_eq!(matcher.matches(url), expected);
}

#[rstest]
fn builder_rejects_missing_required_fields() {
    let result = PlatformProfile::builder(Platform::Claude)
        .container(Selector::parse("main").expect("selector"))
        .build();
    assert!(matches!(
        result,
        Err(ProfileDomainError::MissingField {
            platform: Platform::Claude,
            field: "message",
        })
    ));
}

#[rstest]
fn builder_installs_default_completion_rule() {
    let profile = PlatformProfile::builder(Platform::Grok)
        .container(Selector::parse("main").expect("selector"))
        .message(Selector::parse(".turn").expect("selector"))
        .user(RoleRule::new(Selector::parse(".user").expect("selector")))
        .agent(RoleRule::new(Selector::parse(".agent").expect("selector")))
        .composer(Selector::parse("textarea").expect("selector"))
        .streaming(true)
        .build()
        .expect("profile should build");

    assert!(matches!(
        profile.completion_rule(),
        CompletionRule::IndicatorAbsent(_)
    ));
}

#[rstest]
fn builtin_table_ends_with_matcherless_generic() {
    let profiles = builtin_profiles().expect("built-in table should build");
    let last = profiles.last().expect("table should be non-empty");
    assert!(last.platform().is_generic());
    assert!(last.url_matchers().is_empty());
    assert!(!last.streaming());

    for profile in &profiles {
        if !profile.platform().is_generic() {
            assert!(
                !profile.url_matchers().is_empty(),
                "{} must declare URL matchers",
                profile.platform()
            );
        }
    }
}

#[rstest]
fn builtin_profiles_round_trip_through_serde() {
    let profiles = builtin_profiles().expect("built-in table should build");
    let chatgpt = profiles.first().expect("table should be non-empty");
    let json = serde_json::to_string(chatgpt).expect("serialize");
    let restored: PlatformProfile = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(&restored, chatgpt);
    assert_eq!(restored.settle_delay(), Duration::from_millis(800));
}
