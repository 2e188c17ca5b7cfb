//! Controller lifecycle tests on virtual time.

use crate::capture::adapters::{RecordingCaptureSink, boundary_for};
use crate::capture::services::CaptureHandoff;
use crate::observe::adapters::RecordingDiagnostics;
use crate::observe::ports::DiagnosticEvent;
use crate::observe::services::{ObservationConfig, ObservationController, ObservationPhase};
use crate::page::adapters::{ElementSpec, InMemoryPage};
use crate::page::domain::{MutationBatch, MutationRecord, NodeId};
use crate::page::ports::PageDom;
use crate::profile::domain::{Platform, PlatformProfile, RoleRule};
use crate::profile::services::ProfileResolver;
use crate::turn::domain::{TurnRole, TurnState};
use mockable::DefaultClock;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;

struct World {
    page: Arc<InMemoryPage>,
    sink: Arc<RecordingCaptureSink>,
    diagnostics: Arc<RecordingDiagnostics>,
    controller: ObservationController<DefaultClock>,
}

fn world_on(raw_page: InMemoryPage) -> World {
    world_with_resolver(
        raw_page,
        ProfileResolver::with_builtin().expect("builtin profiles should build"),
    )
}

fn world_with_resolver(raw_page: InMemoryPage, resolver: ProfileResolver) -> World {
    let page = Arc::new(raw_page);
    let sink = Arc::new(RecordingCaptureSink::new());
    let diagnostics = Arc::new(RecordingDiagnostics::new());
    let boundary = boundary_for(page.as_ref()).expect("renderer should construct");
    let handoff = Arc::new(CaptureHandoff::new(
        Arc::clone(&page) as Arc<dyn PageDom>,
        Arc::clone(&sink) as _,
        boundary,
        Arc::clone(&diagnostics) as _,
        Arc::new(DefaultClock),
    ));
    let controller = ObservationController::new(
        Arc::clone(&page) as Arc<dyn PageDom>,
        resolver,
        handoff,
        Arc::clone(&diagnostics) as _,
        Arc::new(DefaultClock),
        ObservationConfig::default().with_container_retries(3, Duration::from_millis(100)),
    );
    World {
        page,
        sink,
        diagnostics,
        controller,
    }
}

const LONG_TEXT: &str = "A fully formed answer, long enough to matter.";

/// Builds a ChatGPT-shaped page: a `main` container under the body.
fn chatgpt_page() -> (InMemoryPage, NodeId) {
    let page = InMemoryPage::new("https://chatgpt.com/c/42", "ChatGPT");
    let main = page
        .append_child(page.root(), &ElementSpec::new("main"))
        .expect("main should attach");
    (page, main)
}

/// Appends a ChatGPT turn with a markdown block, returning both nodes.
fn chatgpt_turn(
    page: &InMemoryPage,
    main: NodeId,
    author: &str,
    text: &str,
) -> (NodeId, NodeId) {
    let turn = page
        .append_child(
            main,
            &ElementSpec::new("div").with_attribute("data-message-author-role", author),
        )
        .expect("turn should attach");
    let markdown = page
        .append_child(
            turn,
            &ElementSpec::new("div").with_class("markdown").with_text(text),
        )
        .expect("markdown should attach");
    (turn, markdown)
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn scenario_a_pre_existing_turn_captures_on_the_initial_scan() {
    let page = InMemoryPage::new("https://example.com/forum", "Forum");
    let turn = page
        .append_child(
            page.root(),
            &ElementSpec::new("div")
                .with_class("message")
                .with_class("assistant")
                .with_text(LONG_TEXT),
        )
        .expect("turn should attach");
    let world = world_on(page);

    world.controller.start("https://example.com/forum").await;

    assert_eq!(world.controller.phase(), ObservationPhase::Observing);
    assert_eq!(world.controller.turn_state(turn), Some(TurnState::CaptureReady));
    let saved = world.sink.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved.first().map(|s| s.role()), Some(TurnRole::Agent));
    assert_eq!(saved.first().map(|s| s.platform()), Some(Platform::Generic));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn scenario_b_streaming_turn_captures_when_the_indicator_leaves() {
    let (page, main) = chatgpt_page();
    let (turn, markdown) = chatgpt_turn(&page, main, "assistant", "Hello");
    let indicator = page
        .append_child(turn, &ElementSpec::new("div").with_class("result-streaming"))
        .expect("indicator should attach");
    let world = world_on(page);
    world.controller.start("https://chatgpt.com/c/42").await;

    assert_eq!(world.controller.turn_state(turn), Some(TurnState::Incomplete));

    for chunk in [
        ", this answer keeps",
        " growing while the",
        " platform streams it",
        " out one piece at a time",
    ] {
        world.page.append_text(markdown, chunk).expect("text should append");
        world
            .controller
            .handle_mutations(&MutationBatch::single(MutationRecord::character_data(
                markdown,
            )))
            .await;
        assert_eq!(
            world.controller.turn_state(turn),
            Some(TurnState::Incomplete),
            "indicator still present"
        );
    }
    assert_eq!(world.sink.save_count(), 0);

    world.page.detach(indicator).expect("indicator should detach");
    world
        .controller
        .handle_mutations(&MutationBatch::single(MutationRecord::child_list(
            turn,
            vec![],
            vec![indicator],
        )))
        .await;

    assert_eq!(world.controller.turn_state(turn), Some(TurnState::CaptureReady));
    assert_eq!(world.sink.save_count(), 1);

    // Further mutations never re-trigger the hand-off.
    world
        .controller
        .handle_mutations(&MutationBatch::single(MutationRecord::character_data(
            markdown,
        )))
        .await;
    assert_eq!(world.sink.save_count(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn short_complete_turn_parks_until_text_grows() {
    let (page, main) = chatgpt_page();
    let (turn, markdown) = chatgpt_turn(&page, main, "assistant", "Short.");
    let world = world_on(page);
    world.controller.start("https://chatgpt.com/c/42").await;

    assert_eq!(world.controller.turn_state(turn), Some(TurnState::Complete));
    assert_eq!(world.sink.save_count(), 0);

    world
        .page
        .append_text(markdown, " Now the answer has grown past the threshold.")
        .expect("text should append");
    world
        .controller
        .handle_mutations(&MutationBatch::single(MutationRecord::character_data(
            markdown,
        )))
        .await;

    assert_eq!(world.controller.turn_state(turn), Some(TurnState::CaptureReady));
    assert_eq!(world.sink.save_count(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn unmatched_role_is_tracked_and_captured_opportunistically() {
    let (page, main) = chatgpt_page();
    let (turn, _) = chatgpt_turn(&page, main, "system", LONG_TEXT);
    let world = world_on(page);

    world.controller.start("https://chatgpt.com/c/42").await;

    assert_eq!(world.controller.turn_state(turn), Some(TurnState::CaptureReady));
    let saved = world.sink.saved();
    assert_eq!(saved.first().map(|s| s.role()), Some(TurnRole::Unknown));
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn scenario_d_missing_container_reports_and_keeps_waiting() {
    let strict_generic = PlatformProfile::builder(Platform::Generic)
        .container(sel("#conversation"))
        .message(sel(".message"))
        .user(RoleRule::new(sel(".user")))
        .agent(RoleRule::new(sel(".assistant")))
        .composer(sel("textarea"))
        .build()
        .expect("profile should build");
    let resolver = ProfileResolver::new(vec![strict_generic]).expect("resolver should build");
    let world = world_with_resolver(
        InMemoryPage::new("https://unknown.example/app", "Unknown"),
        resolver,
    );

    world.controller.start("https://unknown.example/app").await;

    assert_eq!(world.controller.phase(), ObservationPhase::AwaitingContainer);
    assert_eq!(
        world.diagnostics.count_matching(|event| matches!(
            event,
            DiagnosticEvent::UnknownPlatform { .. }
        )),
        1
    );
    assert_eq!(
        world.diagnostics.count_matching(|event| matches!(
            event,
            DiagnosticEvent::ContainerNotFound { attempts: 3, .. }
        )),
        1
    );
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn reset_discards_state_and_a_rescan_starts_fresh() {
    let (page, main) = chatgpt_page();
    let (turn, _) = chatgpt_turn(&page, main, "assistant", LONG_TEXT);
    let world = world_on(page);
    world.controller.start("https://chatgpt.com/c/42").await;
    assert_eq!(world.controller.turn_state(turn), Some(TurnState::CaptureReady));

    world.controller.reset();

    assert_eq!(world.controller.phase(), ObservationPhase::AwaitingContainer);
    assert_eq!(world.controller.tracked_turns(), 0);
    assert_eq!(world.controller.turn_state(turn), None);

    // The same node re-scanned from scratch runs a full fresh lifecycle.
    world.controller.start("https://chatgpt.com/c/42").await;
    assert_eq!(world.controller.turn_state(turn), Some(TurnState::CaptureReady));
    assert_eq!(world.sink.save_count(), 2);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn mutations_outside_the_observing_phase_are_discarded() {
    let (page, main) = chatgpt_page();
    let (turn, _markdown) = chatgpt_turn(&page, main, "assistant", LONG_TEXT);
    let world = world_on(page);

    world
        .controller
        .handle_mutations(&MutationBatch::single(MutationRecord::child_list(
            main,
            vec![turn],
            vec![],
        )))
        .await;
    assert_eq!(world.controller.tracked_turns(), 0);
    assert_eq!(world.sink.save_count(), 0);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn a_detached_record_does_not_stop_the_rest_of_the_batch() {
    let (page, main) = chatgpt_page();
    let world = world_on(page);
    world.controller.start("https://chatgpt.com/c/42").await;

    let doomed = world
        .page
        .append_child(main, &ElementSpec::new("div"))
        .expect("element should attach");
    world.page.detach(doomed).expect("element should detach");
    let (turn, _) = chatgpt_turn(&world.page, main, "assistant", LONG_TEXT);

    world
        .controller
        .handle_mutations(&MutationBatch::new(vec![
            MutationRecord::character_data(doomed),
            MutationRecord::child_list(main, vec![turn], vec![]),
        ]))
        .await;

    assert_eq!(world.controller.turn_state(turn), Some(TurnState::CaptureReady));
    assert_eq!(world.sink.save_count(), 1);
}

#[rstest]
#[tokio::test(start_paused = true)]
async fn watchdog_restarts_when_the_container_is_replaced() {
    let (page, main) = chatgpt_page();
    chatgpt_turn(&page, main, "assistant", LONG_TEXT);
    let world = world_on(page);
    world.controller.start("https://chatgpt.com/c/42").await;
    let first_session = world.controller.session_id();
    assert_eq!(world.sink.save_count(), 1);

    world.page.detach(main).expect("container should detach");
    let new_main = world
        .page
        .append_child(world.page.root(), &ElementSpec::new("main"))
        .expect("new main should attach");
    let (new_turn, _) = chatgpt_turn(&world.page, new_main, "assistant", LONG_TEXT);

    world.controller.watchdog_check().await;

    assert_eq!(world.controller.phase(), ObservationPhase::Observing);
    assert_ne!(world.controller.session_id(), first_session);
    assert_eq!(
        world.controller.turn_state(new_turn),
        Some(TurnState::CaptureReady)
    );
    assert_eq!(world.sink.save_count(), 2);
}

fn sel(source: &str) -> crate::page::domain::Selector {
    crate::page::domain::Selector::parse(source).expect("selector should parse")
}
