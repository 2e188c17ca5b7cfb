//! Text extraction and normalization.

use crate::page::domain::NodeId;
use crate::page::ports::PageDom;
use crate::profile::domain::ContentRule;

/// Action-button labels that platforms render inside a turn's subtree.
/// Stripped from the ends of extracted text so captures carry content,
/// not chrome.
const UI_NOISE_TOKENS: &[&str] = &[
    "Copy code",
    "Copy",
    "Edit",
    "Regenerate",
    "Retry",
    "Share",
    "Good response",
    "Bad response",
    "Read aloud",
    "More",
];

/// Extracts the normalized text of a turn under the profile's content
/// rule. Returns `None` when the rule resolves no non-empty text; an
/// empty extraction never produces an empty capture.
///
/// Extraction is idempotent: an unchanged node yields identical text on
/// every call.
#[must_use]
pub fn extract_text(dom: &dyn PageDom, node: NodeId, rule: &ContentRule) -> Option<String> {
    let raw = match rule {
        ContentRule::Subtree => dom.text_content(node)?,
        ContentRule::FirstMatch(selector) => {
            let target = dom.query(Some(node), selector).unwrap_or(node);
            dom.text_content(target)?
        }
        ContentRule::JoinAll {
            selector,
            separator,
        } => {
            let blocks: Vec<String> = dom
                .query_all(Some(node), selector)
                .into_iter()
                .filter_map(|block| dom.text_content(block))
                .collect();
            if blocks.is_empty() {
                dom.text_content(node)?
            } else {
                blocks.join(separator)
            }
        }
    };
    let cleaned = normalize(&raw);
    (!cleaned.is_empty()).then_some(cleaned)
}

/// Collapses whitespace runs to single spaces and strips UI-noise
/// tokens from both ends.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_noise(&collapsed).to_owned()
}

fn strip_noise(collapsed: &str) -> &str {
    let mut remaining = collapsed;
    loop {
        let mut trimmed = false;
        for token in UI_NOISE_TOKENS {
            if let Some(rest) = remaining.strip_prefix(token)
                && (rest.is_empty() || rest.starts_with(' '))
            {
                remaining = rest.trim_start();
                trimmed = true;
            }
            if let Some(rest) = remaining.strip_suffix(token)
                && (rest.is_empty() || rest.ends_with(' '))
            {
                remaining = rest.trim_end();
                trimmed = true;
            }
        }
        if !trimmed {
            return remaining;
        }
    }
}
