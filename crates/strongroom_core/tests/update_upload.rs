use std::sync::Once;

use strongroom_core::{update, AppState, Effect, Msg, NoticeKind, UploadMode, UploadSource};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(client_logging::initialize_for_tests);
}

fn connected() -> AppState {
    let (state, _) = update(AppState::new(), Msg::Launched);
    let (state, _) = update(state, Msg::ProbeFinished { healthy: true });
    state
}

#[test]
fn submit_without_a_picked_file_is_rejected_locally() {
    init_logging();
    let state = connected();
    let (state, effects) = update(state, Msg::UploadClicked);

    let view = state.view();
    assert!(effects.is_empty());
    assert_eq!(view.notice.as_ref().unwrap().kind, NoticeKind::Error);
    assert!(view
        .notice
        .as_ref()
        .unwrap()
        .message
        .contains("choose a file"));
    assert!(!view.busy);
}

#[test]
fn text_mode_requires_filename_and_content() {
    init_logging();
    let state = connected();
    let (state, _) = update(state, Msg::UploadModeSelected(UploadMode::Text));
    let (state, _) = update(state, Msg::DraftFilenameChanged("notes.txt".to_string()));
    let (state, _) = update(state, Msg::DraftTextChanged("   ".to_string()));
    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(effects.is_empty());
    assert_eq!(
        state.view().notice.as_ref().unwrap().kind,
        NoticeKind::Error
    );
}

#[test]
fn valid_text_draft_becomes_an_inline_upload() {
    init_logging();
    let state = connected();
    let (state, _) = update(state, Msg::UploadModeSelected(UploadMode::Text));
    let (state, _) = update(state, Msg::DraftFilenameChanged("  notes.txt ".to_string()));
    let (state, _) = update(state, Msg::DraftTextChanged("hello".to_string()));
    let (state, effects) = update(state, Msg::UploadClicked);

    assert!(state.view().busy);
    assert_eq!(
        effects,
        vec![Effect::Upload {
            source: UploadSource::InlineText {
                filename: "notes.txt".to_string(),
                text: "hello".to_string(),
            },
        }]
    );
}

#[test]
fn picked_file_becomes_a_path_upload() {
    init_logging();
    let state = connected();
    let (state, _) = update(
        state,
        Msg::UploadPathPicked(Some("/tmp/report.pdf".to_string())),
    );
    let (_state, effects) = update(state, Msg::UploadClicked);

    assert_eq!(
        effects,
        vec![Effect::Upload {
            source: UploadSource::PickedFile {
                path: "/tmp/report.pdf".to_string(),
            },
        }]
    );
}

#[test]
fn second_submit_while_busy_is_ignored() {
    init_logging();
    let state = connected();
    let (state, _) = update(
        state,
        Msg::UploadPathPicked(Some("/tmp/report.pdf".to_string())),
    );
    let (state, first) = update(state, Msg::UploadClicked);
    let (_state, second) = update(state, Msg::UploadClicked);

    assert_eq!(first.len(), 1);
    assert!(second.is_empty());
}

#[test]
fn finished_upload_clears_the_draft_and_refetches() {
    init_logging();
    let state = connected();
    let (state, _) = update(state, Msg::UploadModeSelected(UploadMode::Text));
    let (state, _) = update(state, Msg::DraftFilenameChanged("notes.txt".to_string()));
    let (state, _) = update(state, Msg::DraftTextChanged("hello".to_string()));
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, effects) = update(state, Msg::UploadFinished(Ok(())));

    let view = state.view();
    assert!(!view.busy);
    assert!(view.draft_filename.is_empty());
    assert!(view.draft_text.is_empty());
    assert_eq!(view.notice.as_ref().unwrap().kind, NoticeKind::Success);
    assert_eq!(effects, vec![Effect::FetchList]);
}

#[test]
fn failed_upload_surfaces_the_server_message() {
    init_logging();
    let state = connected();
    let (state, _) = update(
        state,
        Msg::UploadPathPicked(Some("/tmp/report.pdf".to_string())),
    );
    let (state, _) = update(state, Msg::UploadClicked);
    let (state, effects) = update(
        state,
        Msg::UploadFinished(Err("bucket quota exceeded".to_string())),
    );

    let view = state.view();
    assert!(effects.is_empty());
    assert!(!view.busy);
    // The picked file stays staged so the user can retry.
    assert_eq!(view.picked_path.as_deref(), Some("/tmp/report.pdf"));
    let notice = view.notice.as_ref().unwrap();
    assert_eq!(notice.kind, NoticeKind::Error);
    assert!(notice.message.contains("bucket quota exceeded"));
}
