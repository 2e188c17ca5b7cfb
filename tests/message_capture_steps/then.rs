//! Then steps for conversation capture BDD scenarios.

use super::world::CaptureWorld;
use eyre::ensure;
use rstest_bdd_macros::then;
use turnscribe::observe::ports::DiagnosticEvent;
use turnscribe::observe::services::ObservationPhase;
use turnscribe::turn::domain::TurnRole;

#[then("exactly {count:usize} snapshot is saved")]
fn snapshots_saved(world: &mut CaptureWorld, count: usize) -> Result<(), eyre::Report> {
    let saved = world.harness()?.sink.save_count();
    ensure!(saved == count, "expected {count} snapshots, saw {saved}");
    Ok(())
}

#[then("the saved snapshot carries the agent role")]
fn snapshot_has_agent_role(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    let saved = world.harness()?.sink.saved();
    let snapshot = saved
        .first()
        .ok_or_else(|| eyre::eyre!("no snapshot was saved"))?;
    ensure!(
        snapshot.role() == TurnRole::Agent,
        "expected agent role, saw {}",
        snapshot.role()
    );
    Ok(())
}

#[then("exactly {count:usize} observation restart runs")]
fn restarts_ran(world: &mut CaptureWorld, count: usize) -> Result<(), eyre::Report> {
    let restarts = world.harness()?.control.restarts();
    ensure!(restarts == count, "expected {count} restarts, saw {restarts}");
    Ok(())
}

#[then("a container-not-found event is reported after {attempts:u32} attempts")]
fn container_not_found_reported(
    world: &mut CaptureWorld,
    attempts: u32,
) -> Result<(), eyre::Report> {
    let matching = world.harness()?.diagnostics.count_matching(|event| {
        matches!(
            event,
            DiagnosticEvent::ContainerNotFound { attempts: seen, .. } if *seen == attempts
        )
    });
    ensure!(matching == 1, "expected one container-not-found event, saw {matching}");
    Ok(())
}

#[then("the controller keeps awaiting a container")]
fn controller_awaits_container(world: &mut CaptureWorld) -> Result<(), eyre::Report> {
    let phase = world.harness()?.controller.phase();
    ensure!(
        phase == ObservationPhase::AwaitingContainer,
        "expected awaiting-container, saw {phase}"
    );
    Ok(())
}
