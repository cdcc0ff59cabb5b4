use crate::state::{
    AppState, BucketHealthState, FileRecord, GateState, NoticeKind, UploadDraft, UploadMode,
    VerifyState,
};
use crate::{DownloadSource, Effect, Msg, UploadSource};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Launched => {
            state.set_gate(GateState::Loading);
            vec![Effect::ProbeServer]
        }
        Msg::ProbeFinished { healthy } => {
            if healthy {
                state.set_gate(GateState::Connected);
                state.show_notice("Server connected successfully!", NoticeKind::Success);
                state.set_bucket_health(BucketHealthState::Checking);
                vec![Effect::FetchList, Effect::CheckBucketHealth]
            } else {
                // Terminal until the user retries; no automatic backoff.
                state.set_gate(GateState::Unreachable);
                state.show_notice(
                    "Failed to connect to the server. Please try again.",
                    NoticeKind::Error,
                );
                Vec::new()
            }
        }
        Msg::RetryClicked => {
            if state.gate() == GateState::Unreachable {
                state.set_gate(GateState::Loading);
                vec![Effect::ProbeServer]
            } else {
                Vec::new()
            }
        }
        Msg::ListFetched(Ok(files)) => {
            state.replace_files(files);
            Vec::new()
        }
        Msg::ListFetched(Err(_)) => {
            state.show_notice("Could not fetch the file list.", NoticeKind::Error);
            Vec::new()
        }
        Msg::UploadModeSelected(mode) => {
            state.select_upload_mode(mode);
            Vec::new()
        }
        Msg::UploadPathPicked(path) => {
            state.set_picked_path(path);
            Vec::new()
        }
        Msg::DraftFilenameChanged(filename) => {
            state.set_draft_filename(filename);
            Vec::new()
        }
        Msg::DraftTextChanged(text) => {
            state.set_draft_text(text);
            Vec::new()
        }
        Msg::UploadClicked => {
            if state.busy() {
                return (state, Vec::new());
            }
            match stage_upload(state.draft()) {
                Ok(source) => {
                    state.set_busy(true);
                    vec![Effect::Upload { source }]
                }
                Err(message) => {
                    state.show_notice(message, NoticeKind::Error);
                    Vec::new()
                }
            }
        }
        Msg::UploadFinished(result) => {
            state.set_busy(false);
            match result {
                Ok(()) => {
                    state.show_notice("File uploaded successfully!", NoticeKind::Success);
                    state.clear_submitted_draft();
                    vec![Effect::FetchList]
                }
                Err(reason) => {
                    state.show_notice(format!("Upload failed: {reason}"), NoticeKind::Error);
                    Vec::new()
                }
            }
        }
        Msg::DownloadClicked {
            id,
            filename,
            target,
        } => {
            state.show_notice(format!("Downloading \"{filename}\"..."), NoticeKind::Info);
            vec![Effect::Download {
                id,
                filename,
                target,
            }]
        }
        Msg::DownloadFellBack { filename } => {
            state.show_notice(
                format!("Primary failed for \"{filename}\", trying backup..."),
                NoticeKind::Info,
            );
            Vec::new()
        }
        Msg::DownloadFinished { filename, result } => {
            match result {
                Ok(source) => {
                    let served_from = match source {
                        DownloadSource::Primary => "primary",
                        DownloadSource::Backup => "backup",
                    };
                    state.show_notice(
                        format!("Downloaded \"{filename}\" from {served_from} storage"),
                        NoticeKind::Success,
                    );
                }
                Err(_) => {
                    state.show_notice(
                        format!("Download failed: \"{filename}\" is corrupted or unavailable"),
                        NoticeKind::Error,
                    );
                }
            }
            Vec::new()
        }
        Msg::DeleteClicked { id, filename } => {
            state.request_delete(FileRecord { id, filename });
            Vec::new()
        }
        Msg::DeleteConfirmed => {
            if state.busy() {
                Vec::new()
            } else if let Some(file) = state.take_pending_delete() {
                state.set_busy(true);
                vec![Effect::Delete { id: file.id }]
            } else {
                Vec::new()
            }
        }
        Msg::DeleteDismissed => {
            state.cancel_pending_delete();
            Vec::new()
        }
        Msg::DeleteFinished(result) => {
            state.set_busy(false);
            match result {
                Ok(()) => {
                    state.show_notice("File deleted successfully!", NoticeKind::Success);
                    vec![Effect::FetchList]
                }
                Err(reason) => {
                    state.show_notice(format!("Deletion failed: {reason}"), NoticeKind::Error);
                    Vec::new()
                }
            }
        }
        Msg::HealthRefreshClicked => {
            if state.bucket_health() == BucketHealthState::Checking {
                Vec::new()
            } else {
                state.set_bucket_health(BucketHealthState::Checking);
                vec![Effect::CheckBucketHealth]
            }
        }
        Msg::HealthFetched(result) => {
            let health = match result {
                Ok(report) => BucketHealthState::Ready {
                    primary_ok: report.primary_ok,
                    backup_ok: report.backup_ok,
                },
                Err(_) => BucketHealthState::Unavailable,
            };
            state.set_bucket_health(health);
            Vec::new()
        }
        Msg::VerifyClicked => {
            let can_start = matches!(
                state.verify(),
                VerifyState::Idle | VerifyState::Unavailable
            );
            if can_start {
                state.set_verify(VerifyState::Running);
                vec![Effect::VerifyAll]
            } else {
                Vec::new()
            }
        }
        Msg::VerifyFinished(result) => {
            let verify = match result {
                Ok(rows) => VerifyState::Verified(rows),
                Err(_) => VerifyState::Unavailable,
            };
            state.set_verify(verify);
            Vec::new()
        }
        Msg::NoticeDismissed => {
            state.clear_notice();
            Vec::new()
        }
        Msg::Tick => {
            state.age_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Client-side validation: decides what the upload request should carry, or
/// why it must not be sent.
fn stage_upload(draft: &UploadDraft) -> Result<UploadSource, &'static str> {
    match draft.mode {
        UploadMode::File => match &draft.picked_path {
            Some(path) => Ok(UploadSource::PickedFile { path: path.clone() }),
            None => Err("Please choose a file first."),
        },
        UploadMode::Text => {
            if draft.filename.trim().is_empty() || draft.text.trim().is_empty() {
                Err("Please provide both a filename and text content.")
            } else {
                Ok(UploadSource::InlineText {
                    filename: draft.filename.trim().to_string(),
                    text: draft.text.clone(),
                })
            }
        }
    }
}
