use std::sync::Once;

use strongroom_core::{update, AppState, Effect, GateState, Msg, NoticeKind};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn launch(state: AppState) -> (AppState, Vec<Effect>) {
    update(state, Msg::Launched)
}

#[test]
fn launch_probes_the_server_once() {
    init_logging();
    let (state, effects) = launch(AppState::new());

    assert_eq!(state.view().gate, GateState::Loading);
    assert_eq!(effects, vec![Effect::ProbeServer]);
}

#[test]
fn failed_probe_parks_the_gate_without_fetching() {
    init_logging();
    let (state, _) = launch(AppState::new());
    let (mut state, effects) = update(state, Msg::ProbeFinished { healthy: false });

    let view = state.view();
    assert_eq!(view.gate, GateState::Unreachable);
    assert_eq!(view.notice.as_ref().unwrap().kind, NoticeKind::Error);
    assert!(!effects.contains(&Effect::FetchList));
    assert!(effects.is_empty());
    assert!(state.consume_dirty());
}

#[test]
fn healthy_probe_connects_and_fetches_exactly_once() {
    init_logging();
    let (state, _) = launch(AppState::new());
    let (state, effects) = update(state, Msg::ProbeFinished { healthy: true });

    let view = state.view();
    assert_eq!(view.gate, GateState::Connected);
    assert_eq!(view.notice.as_ref().unwrap().kind, NoticeKind::Success);
    let list_fetches = effects
        .iter()
        .filter(|effect| **effect == Effect::FetchList)
        .count();
    assert_eq!(list_fetches, 1);
    assert!(effects.contains(&Effect::CheckBucketHealth));
}

#[test]
fn retry_from_unreachable_probes_again() {
    init_logging();
    let (state, _) = launch(AppState::new());
    let (state, _) = update(state, Msg::ProbeFinished { healthy: false });
    let (state, effects) = update(state, Msg::RetryClicked);

    assert_eq!(state.view().gate, GateState::Loading);
    assert_eq!(effects, vec![Effect::ProbeServer]);
}

#[test]
fn retry_while_connected_is_ignored() {
    init_logging();
    let (state, _) = launch(AppState::new());
    let (state, _) = update(state, Msg::ProbeFinished { healthy: true });
    let (state, effects) = update(state, Msg::RetryClicked);

    assert_eq!(state.view().gate, GateState::Connected);
    assert!(effects.is_empty());
}
