use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use client_logging::client_info;
use strongroom_client::{ApiError, ClientEvent, ClientSettings, EngineHandle, FailureKind};
use strongroom_core::{
    BucketReport, DownloadSource, DownloadTarget, Effect, FileRecord, Msg, UploadSource, VerifyRow,
};

use super::config::AppConfig;

/// Owns the engine: turns core effects into engine commands and pumps engine
/// events back into the message channel.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: &AppConfig, msg_tx: mpsc::Sender<Msg>) -> Result<Self, ApiError> {
        let settings = ClientSettings {
            base_url: config.base_url.clone(),
            ..ClientSettings::default()
        };
        let engine = EngineHandle::new(settings, config.download_dir.clone())?;
        let runner = Self { engine };
        runner.spawn_event_loop(msg_tx);
        Ok(runner)
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ProbeServer => {
                    client_info!("probing service root");
                    self.engine.probe();
                }
                Effect::FetchList => self.engine.fetch_list(),
                Effect::Upload { source } => self.engine.upload(map_upload_source(source)),
                Effect::Download {
                    id,
                    filename,
                    target,
                } => {
                    client_info!("download {} target={:?}", id, target);
                    self.engine.download(id, filename, map_target(target));
                }
                Effect::Delete { id } => self.engine.delete(id),
                Effect::CheckBucketHealth => self.engine.check_bucket_health(),
                Effect::VerifyAll => self.engine.verify_all(),
            }
        }
    }

    fn spawn_event_loop(&self, msg_tx: mpsc::Sender<Msg>) {
        let engine = self.engine.clone();
        thread::spawn(move || loop {
            if let Some(event) = engine.try_recv() {
                if msg_tx.send(map_event(event)).is_err() {
                    break;
                }
            } else {
                thread::sleep(Duration::from_millis(20));
            }
        });
    }
}

fn map_upload_source(source: UploadSource) -> strongroom_client::UploadSource {
    match source {
        UploadSource::PickedFile { path } => strongroom_client::UploadSource::PickedFile {
            path: path.into(),
        },
        UploadSource::InlineText { filename, text } => {
            strongroom_client::UploadSource::InlineText { filename, text }
        }
    }
}

fn map_target(target: DownloadTarget) -> strongroom_client::DownloadTarget {
    match target {
        DownloadTarget::Primary => strongroom_client::DownloadTarget::Primary,
        DownloadTarget::Backup => strongroom_client::DownloadTarget::Backup,
        DownloadTarget::Safe => strongroom_client::DownloadTarget::Safe,
    }
}

fn map_copy(copy: strongroom_client::StorageCopy) -> DownloadSource {
    match copy {
        strongroom_client::StorageCopy::Primary => DownloadSource::Primary,
        strongroom_client::StorageCopy::Backup => DownloadSource::Backup,
    }
}

/// The notice-worthy part of an error: the server's own words for a
/// rejection, the full description otherwise.
fn notice_reason(err: ApiError) -> String {
    match err.kind {
        FailureKind::Rejected => err.message,
        _ => err.to_string(),
    }
}

fn map_event(event: ClientEvent) -> Msg {
    match event {
        ClientEvent::ProbeFinished { healthy } => Msg::ProbeFinished { healthy },
        ClientEvent::ListFetched(result) => Msg::ListFetched(
            result
                .map(|files| {
                    files
                        .into_iter()
                        .map(|file| FileRecord {
                            id: file.id,
                            filename: file.filename,
                        })
                        .collect()
                })
                .map_err(notice_reason),
        ),
        ClientEvent::UploadFinished(result) => Msg::UploadFinished(result.map_err(notice_reason)),
        ClientEvent::DownloadFellBack { filename } => Msg::DownloadFellBack { filename },
        ClientEvent::DownloadFinished { filename, result } => Msg::DownloadFinished {
            filename,
            result: result
                .map(|receipt| map_copy(receipt.served_from))
                .map_err(notice_reason),
        },
        ClientEvent::DeleteFinished(result) => Msg::DeleteFinished(result.map_err(notice_reason)),
        ClientEvent::HealthFetched(result) => Msg::HealthFetched(
            result
                .map(|health| BucketReport {
                    primary_ok: health.primary_ok,
                    backup_ok: health.backup_ok,
                })
                .map_err(notice_reason),
        ),
        ClientEvent::VerifyFinished(result) => Msg::VerifyFinished(
            result
                .map(|rows| {
                    rows.into_iter()
                        .map(|row| VerifyRow {
                            filename: row.filename,
                            primary_ok: row.primary_ok,
                            backup_ok: row.backup_ok,
                        })
                        .collect()
                })
                .map_err(notice_reason),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::{map_event, notice_reason};
    use strongroom_client::{ApiError, ClientEvent, FailureKind};
    use strongroom_core::Msg;

    #[test]
    fn rejections_surface_the_server_reason_verbatim() {
        let err = ApiError {
            kind: FailureKind::Rejected,
            message: "no file uploaded".to_string(),
        };
        assert_eq!(notice_reason(err), "no file uploaded");
    }

    #[test]
    fn other_failures_keep_their_kind_in_the_reason() {
        let err = ApiError {
            kind: FailureKind::Timeout,
            message: "deadline elapsed".to_string(),
        };
        assert!(notice_reason(err).contains("timeout"));
    }

    #[test]
    fn probe_events_map_straight_through() {
        let msg = map_event(ClientEvent::ProbeFinished { healthy: true });
        assert_eq!(msg, Msg::ProbeFinished { healthy: true });
    }
}
