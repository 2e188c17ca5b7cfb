//! Transition-legality tests for the turn state machine.

use crate::page::domain::NodeId;
use crate::turn::domain::{TurnDomainError, TurnRecord, TurnRole, TurnState};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
#[case(TurnState::Discovered, TurnState::Incomplete, true)]
#[case(TurnState::Discovered, TurnState::Complete, true)]
#[case(TurnState::Incomplete, TurnState::Complete, true)]
#[case(TurnState::Complete, TurnState::CaptureReady, true)]
#[case(TurnState::Discovered, TurnState::CaptureReady, false)]
#[case(TurnState::Incomplete, TurnState::CaptureReady, false)]
#[case(TurnState::Incomplete, TurnState::Discovered, false)]
#[case(TurnState::Complete, TurnState::Incomplete, false)]
#[case(TurnState::CaptureReady, TurnState::Complete, false)]
#[case(TurnState::CaptureReady, TurnState::Discovered, false)]
fn transition_table(#[case] from: TurnState, #[case] to: TurnState, #[case] legal: bool) {
    assert_eq!(from.can_transition(to), legal, "{from} → {to}");
    match from.transition(to) {
        Ok(next) => assert!(legal && next == to),
        Err(TurnDomainError::InvalidTransition {
            from: err_from,
            to: err_to,
        }) => {
            assert!(!legal);
            assert_eq!(err_from, from);
            assert_eq!(err_to, to);
        }
    }
}

#[rstest]
fn capture_ready_is_terminal() {
    assert!(TurnState::CaptureReady.is_terminal());
    assert!(!TurnState::Complete.is_terminal());
}

#[rstest]
fn record_stamps_captured_at_only_on_terminal_entry() {
    let clock = DefaultClock;
    let mut record = TurnRecord::discovered(NodeId::from_raw(7), TurnRole::Agent);
    assert!(record.captured_at().is_none());

    record
        .transition(TurnState::Incomplete, &clock)
        .expect("discovered → incomplete");
    record
        .transition(TurnState::Complete, &clock)
        .expect("incomplete → complete");
    assert!(record.captured_at().is_none());

    record
        .transition(TurnState::CaptureReady, &clock)
        .expect("complete → capture ready");
    assert!(record.captured_at().is_some());
    assert!(record.is_capture_ready());
}

#[rstest]
fn record_role_refines_only_from_unknown() {
    let mut record = TurnRecord::discovered(NodeId::from_raw(1), TurnRole::Unknown);
    record.refine_role(TurnRole::Agent);
    assert_eq!(record.role(), TurnRole::Agent);

    record.refine_role(TurnRole::User);
    assert_eq!(record.role(), TurnRole::Agent, "settled roles never flip");
}
