//! Role and completion classification against the live page.

use crate::page::domain::NodeId;
use crate::page::ports::PageDom;
use crate::profile::domain::{CompletionRule, PlatformProfile, RoleRule};
use crate::turn::domain::TurnRole;

/// Classifies a turn's author through the profile's role rules. A turn
/// matching neither rule stays `Unknown`; it is still tracked and may be
/// captured opportunistically once it completes with substantial text.
#[must_use]
pub fn classify_role(dom: &dyn PageDom, node: NodeId, profile: &PlatformProfile) -> TurnRole {
    if rule_matches(dom, node, profile.user_rule()) {
        TurnRole::User
    } else if rule_matches(dom, node, profile.agent_rule()) {
        TurnRole::Agent
    } else {
        TurnRole::Unknown
    }
}

fn rule_matches(dom: &dyn PageDom, node: NodeId, rule: &RoleRule) -> bool {
    if dom.matches(node, rule.selector()) || dom.query(Some(node), rule.selector()).is_some() {
        return true;
    }
    rule.action_bar()
        .is_some_and(|bar| dom.query(Some(node), bar).is_some())
}

/// Evaluates the profile's completion predicate for a turn. Callers
/// short-circuit this for non-streaming profiles, where every turn is
/// complete on sight.
#[must_use]
pub fn completion_met(dom: &dyn PageDom, node: NodeId, rule: &CompletionRule) -> bool {
    match rule {
        CompletionRule::IndicatorAbsent(selector) => {
            !dom.matches(node, selector) && dom.query(Some(node), selector).is_none()
        }
        CompletionRule::AttributeMissing { name } => dom.attribute(node, name).is_none(),
        CompletionRule::AttributeEquals { name, value } => {
            dom.attribute(node, name).as_deref() == Some(value.as_str())
        }
    }
}
