//! URL matching rules for profile selection.

use serde::{Deserialize, Serialize};

/// One URL rule of a profile's ordered matcher list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UrlMatcher {
    /// Matches when the URL contains the given fragment.
    Substring(String),
    /// Matches the whole URL against a `*`-wildcard pattern.
    Glob(String),
}

impl UrlMatcher {
    /// Evaluates the rule against a URL.
    #[must_use]
    pub fn matches(&self, url: &str) -> bool {
        match self {
            Self::Substring(fragment) => url.contains(fragment.as_str()),
            Self::Glob(pattern) => glob_match(pattern, url),
        }
    }
}

/// Wildcard match where `*` spans any run of characters.
fn glob_match(pattern: &str, value: &str) -> bool {
    let pattern_chars: Vec<char> = pattern.chars().collect();
    let value_chars: Vec<char> = value.chars().collect();
    glob_match_at(&pattern_chars, &value_chars)
}

fn glob_match_at(pattern: &[char], value: &[char]) -> bool {
    match pattern.split_first() {
        None => value.is_empty(),
        Some(('*', rest_pattern)) => (0..=value.len())
            .any(|skip| value.get(skip..).is_some_and(|rest| glob_match_at(rest_pattern, rest))),
        Some((&expected, rest_pattern)) => value
            .split_first()
            .is_some_and(|(&actual, rest_value)| {
                actual == expected && glob_match_at(rest_pattern, rest_value)
            }),
    }
}
