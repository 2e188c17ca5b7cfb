//! Given steps for conversation capture BDD scenarios.

use super::world::{CaptureWorld, Harness};
use rstest_bdd_macros::given;
use turnscribe::page::adapters::{ElementSpec, InMemoryPage};
use turnscribe::page::domain::Selector;
use turnscribe::profile::domain::{Platform, PlatformProfile, RoleRule};
use turnscribe::profile::services::ProfileResolver;

const ANSWER: &str = "A fully formed answer, long enough to matter.";

fn chatgpt_page_with_turn(
    streaming: bool,
    world: &mut CaptureWorld,
) -> Result<(), eyre::Report> {
    let page = InMemoryPage::new("https://chatgpt.com/c/1", "ChatGPT");
    let main = page.append_child(page.root(), &ElementSpec::new("main"))?;
    let turn = page.append_child(
        main,
        &ElementSpec::new("div").with_attribute("data-message-author-role", "assistant"),
    )?;
    let initial_text = if streaming { "Hello" } else { ANSWER };
    let content = page.append_child(
        turn,
        &ElementSpec::new("div").with_class("markdown").with_text(initial_text),
    )?;
    if streaming {
        let indicator = page.append_child(
            turn,
            &ElementSpec::new("div").with_class("result-streaming"),
        )?;
        world.indicator = Some(indicator);
    }
    world.turn = Some(turn);
    world.content = Some(content);
    world.harness = Some(Harness::new(page, ProfileResolver::with_builtin()?)?);
    Ok(())
}

#[given("a ChatGPT page whose conversation holds a completed agent turn")]
fn completed_agent_turn(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    chatgpt_page_with_turn(false, world)
}

#[given("a ChatGPT page whose conversation holds a streaming agent turn")]
fn streaming_agent_turn(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    chatgpt_page_with_turn(true, world)
}

#[given("a page no declared profile matches")]
fn unmatched_page(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    let strict_generic = PlatformProfile::builder(Platform::Generic)
        .container(Selector::parse("#conversation")?)
        .message(Selector::parse(".message")?)
        .user(RoleRule::new(Selector::parse(".user")?))
        .agent(RoleRule::new(Selector::parse(".assistant")?))
        .composer(Selector::parse("textarea")?)
        .build()?;
    let resolver = ProfileResolver::new(vec![strict_generic])?;
    world.harness = Some(Harness::new(
        InMemoryPage::new("https://unknown.example/app", "Unknown"),
        resolver,
    )?);
    Ok(())
}
