//! Extraction and normalization tests.

use crate::observe::services::{extract_text, normalize};
use crate::page::adapters::{ElementSpec, InMemoryPage};
use crate::page::domain::Selector;
use crate::profile::domain::ContentRule;
use rstest::rstest;

#[rstest]
#[case("  hello   world  ", "hello world")]
#[case("line\none\n\nline two", "line one line two")]
#[case("Copy code fn main() {}", "fn main() {}")]
#[case("the full answer Copy Regenerate", "the full answer")]
#[case("Share the reply after the label", "the reply after the label")]
#[case("Copy", "")]
fn normalization_collapses_and_strips_noise(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize(raw), expected);
}

#[rstest]
fn extraction_is_idempotent_for_an_unchanged_node() {
    let page = InMemoryPage::new("https://example.com", "Example");
    let turn = page
        .append_child(
            page.root(),
            &ElementSpec::new("div")
                .with_class("message")
                .with_text("  an   answer with    uneven spacing  "),
        )
        .expect("turn should attach");

    let first = extract_text(&page, turn, &ContentRule::Subtree);
    let second = extract_text(&page, turn, &ContentRule::Subtree);
    assert_eq!(first.as_deref(), Some("an answer with uneven spacing"));
    assert_eq!(first, second);
}

#[rstest]
fn first_match_rule_prefers_the_content_block() {
    let page = InMemoryPage::new("https://example.com", "Example");
    let turn = page
        .append_child(page.root(), &ElementSpec::new("div").with_class("message"))
        .expect("turn should attach");
    page.append_child(
        turn,
        &ElementSpec::new("div")
            .with_class("actions")
            .with_text("Regenerate"),
    )
    .expect("actions should attach");
    page.append_child(
        turn,
        &ElementSpec::new("div")
            .with_class("markdown")
            .with_text("the real content"),
    )
    .expect("content should attach");

    let rule = ContentRule::FirstMatch(
        Selector::parse(".markdown").expect("selector should parse"),
    );
    assert_eq!(
        extract_text(&page, turn, &rule).as_deref(),
        Some("the real content")
    );
}

#[rstest]
fn join_all_rule_concatenates_blocks_in_order() {
    let page = InMemoryPage::new("https://example.com", "Example");
    let turn = page
        .append_child(page.root(), &ElementSpec::new("div").with_class("message"))
        .expect("turn should attach");
    page.append_child(turn, &ElementSpec::new("p").with_text("first paragraph"))
        .expect("paragraph should attach");
    page.append_child(turn, &ElementSpec::new("pre").with_text("second block"))
        .expect("block should attach");

    let rule = ContentRule::JoinAll {
        selector: Selector::parse("p, pre").expect("selector should parse"),
        separator: "\n".to_owned(),
    };
    // Normalization runs after joining, so the separator collapses.
    assert_eq!(
        extract_text(&page, turn, &rule).as_deref(),
        Some("first paragraph second block")
    );
}

#[rstest]
fn empty_extraction_yields_none() {
    let page = InMemoryPage::new("https://example.com", "Example");
    let turn = page
        .append_child(page.root(), &ElementSpec::new("div").with_class("message"))
        .expect("turn should attach");

    assert!(extract_text(&page, turn, &ContentRule::Subtree).is_none());
}
