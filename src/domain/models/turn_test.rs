use std::time::Duration;

use super::TurnReport;
use super::TurnState;
use crate::domain::models::StopReason;

#[test]
fn it_allows_the_turn_cycle() {
    assert!(TurnState::Idle.can_transition_to(TurnState::AwaitingResponse));
    assert!(TurnState::AwaitingResponse.can_transition_to(TurnState::RenderingStream));
    assert!(TurnState::AwaitingResponse.can_transition_to(TurnState::RenderingComplete));
    assert!(TurnState::RenderingStream.can_transition_to(TurnState::Idle));
    assert!(TurnState::RenderingComplete.can_transition_to(TurnState::Idle));
}

#[test]
fn it_only_fails_while_waiting_or_streaming() {
    assert!(TurnState::AwaitingResponse.can_transition_to(TurnState::Failed));
    assert!(TurnState::RenderingStream.can_transition_to(TurnState::Failed));
    assert!(!TurnState::RenderingComplete.can_transition_to(TurnState::Failed));
    assert!(!TurnState::Idle.can_transition_to(TurnState::Failed));
    assert!(TurnState::Failed.can_transition_to(TurnState::Idle));
}

#[test]
fn it_rejects_leaving_a_turn_early() {
    assert!(!TurnState::AwaitingResponse.can_transition_to(TurnState::AwaitingResponse));
    assert!(!TurnState::RenderingStream.can_transition_to(TurnState::AwaitingResponse));
    assert!(!TurnState::Idle.can_transition_to(TurnState::RenderingStream));
    assert!(!TurnState::Failed.can_transition_to(TurnState::AwaitingResponse));
}

#[test]
fn it_formats_notices() {
    let report = TurnReport {
        text: "Hello".to_string(),
        stop_reason: StopReason::NaturalStop,
        elapsed: Duration::from_millis(1234),
        tokens: Some(21),
        show_elapsed: true,
    };

    assert_eq!(
        report.notices(),
        vec!["use tokens: 21".to_string(), "Use time: 1.23s".to_string()]
    );
}

#[test]
fn it_notes_cancelled_streams() {
    let report = TurnReport {
        text: "Hel".to_string(),
        stop_reason: StopReason::Cancelled,
        elapsed: Duration::from_millis(10),
        tokens: None,
        show_elapsed: false,
    };

    assert_eq!(report.notices(), vec!["Streaming stopped.".to_string()]);
}
