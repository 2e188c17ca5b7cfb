//! When steps for conversation capture BDD scenarios.

use super::world::{CaptureWorld, run_async};
use eyre::ensure;
use rstest_bdd_macros::when;
use std::sync::Arc;
use std::time::Duration;
use turnscribe::navigation::domain::{NavigationSignal, NavigationTrigger};
use turnscribe::page::domain::{MutationBatch, MutationRecord};

#[when(r#"observation starts against "{url}""#)]
fn observation_starts(world: &mut CaptureWorld, url: String) -> Result<(), eyre::Report> {
    let controller = Arc::clone(&world.harness()?.controller);
    run_async(controller.start(&url));
    Ok(())
}

#[when("the turn streams {count:usize} further text chunks")]
fn turn_streams_chunks(world: &mut CaptureWorld, count: usize) -> Result<(), eyre::Report> {
    let content = world
        .content
        .ok_or_else(|| eyre::eyre!("missing content node in scenario world"))?;
    let harness = world.harness()?;
    for index in 0..count {
        harness
            .page
            .append_text(content, &format!(" streamed chunk number {index} of the answer"))?;
        run_async(
            harness
                .controller
                .handle_mutations(&MutationBatch::single(MutationRecord::character_data(
                    content,
                ))),
        );
    }
    Ok(())
}

#[when("the loading indicator is removed")]
fn indicator_removed(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    let indicator = world
        .indicator
        .ok_or_else(|| eyre::eyre!("missing indicator node in scenario world"))?;
    let turn = world
        .turn
        .ok_or_else(|| eyre::eyre!("missing turn node in scenario world"))?;
    let harness = world.harness()?;
    ensure!(
        harness.sink.save_count() == 0,
        "no capture may happen while the indicator is present"
    );
    harness.page.detach(indicator)?;
    run_async(
        harness
            .controller
            .handle_mutations(&MutationBatch::single(MutationRecord::child_list(
                turn,
                vec![],
                vec![indicator],
            ))),
    );
    Ok(())
}

#[when("{count:usize} navigation signals arrive in a burst")]
fn navigation_burst(world: &mut CaptureWorld, count: usize) -> Result<(), eyre::Report> {
    let harness = world.harness()?;
    run_async(async {
        let mut waits = Vec::new();
        for index in 0..count {
            let watcher = Arc::clone(&harness.watcher);
            waits.push(tokio::spawn(async move {
                watcher
                    .handle_signal(NavigationSignal::new(
                        format!("https://chatgpt.com/c/{index}"),
                        NavigationTrigger::HistoryPush,
                    ))
                    .await;
            }));
        }
        for wait in waits {
            wait.await?;
        }
        tokio::time::sleep(Duration::from_millis(600)).await;
        Ok::<(), eyre::Report>(())
    })
}
