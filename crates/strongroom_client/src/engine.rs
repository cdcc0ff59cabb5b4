use std::path::PathBuf;
use std::sync::{mpsc, Arc, Mutex};
use std::thread;

use client_logging::{client_error, client_warn};

use crate::api::{ClientSettings, ReqwestStorageApi, StorageApi};
use crate::download::{ChannelProgressSink, Downloader};
use crate::types::{ApiError, ClientEvent, DownloadTarget, FailureKind, UploadSource};

enum EngineCommand {
    Probe,
    FetchList,
    Upload {
        source: UploadSource,
    },
    Download {
        id: String,
        filename: String,
        target: DownloadTarget,
    },
    Delete {
        id: String,
    },
    CheckBucketHealth,
    VerifyAll,
}

/// Handle to the background engine. Commands run as independent tasks on a
/// dedicated tokio runtime; completions come back through `try_recv`.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: Arc<Mutex<mpsc::Receiver<ClientEvent>>>,
}

impl EngineHandle {
    pub fn new(settings: ClientSettings, download_dir: PathBuf) -> Result<Self, ApiError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let api: Arc<dyn StorageApi> = Arc::new(ReqwestStorageApi::new(&settings)?);
        let downloader = Arc::new(Downloader::new(api.clone(), download_dir));

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_error!("engine runtime failed to start: {}", err);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let api = api.clone();
                let downloader = downloader.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(api.as_ref(), downloader.as_ref(), command, event_tx).await;
                });
            }
        });

        Ok(Self {
            cmd_tx,
            event_rx: Arc::new(Mutex::new(event_rx)),
        })
    }

    pub fn probe(&self) {
        self.send(EngineCommand::Probe);
    }

    pub fn fetch_list(&self) {
        self.send(EngineCommand::FetchList);
    }

    pub fn upload(&self, source: UploadSource) {
        self.send(EngineCommand::Upload { source });
    }

    pub fn download(
        &self,
        id: impl Into<String>,
        filename: impl Into<String>,
        target: DownloadTarget,
    ) {
        self.send(EngineCommand::Download {
            id: id.into(),
            filename: filename.into(),
            target,
        });
    }

    pub fn delete(&self, id: impl Into<String>) {
        self.send(EngineCommand::Delete { id: id.into() });
    }

    pub fn check_bucket_health(&self) {
        self.send(EngineCommand::CheckBucketHealth);
    }

    pub fn verify_all(&self) {
        self.send(EngineCommand::VerifyAll);
    }

    pub fn try_recv(&self) -> Option<ClientEvent> {
        self.event_rx
            .lock()
            .ok()
            .and_then(|rx| rx.try_recv().ok())
    }

    fn send(&self, command: EngineCommand) {
        let _ = self.cmd_tx.send(command);
    }
}

async fn handle_command(
    api: &dyn StorageApi,
    downloader: &Downloader,
    command: EngineCommand,
    event_tx: mpsc::Sender<ClientEvent>,
) {
    let event = match command {
        EngineCommand::Probe => {
            let healthy = match api.probe().await {
                Ok(()) => true,
                Err(err) => {
                    client_warn!("probe failed: {}", err);
                    false
                }
            };
            ClientEvent::ProbeFinished { healthy }
        }
        EngineCommand::FetchList => ClientEvent::ListFetched(api.list().await),
        EngineCommand::Upload { source } => ClientEvent::UploadFinished(run_upload(api, source).await),
        EngineCommand::Download {
            id,
            filename,
            target,
        } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = downloader.fetch(&id, &filename, target, &sink).await;
            ClientEvent::DownloadFinished { filename, result }
        }
        EngineCommand::Delete { id } => ClientEvent::DeleteFinished(api.delete(&id).await),
        EngineCommand::CheckBucketHealth => ClientEvent::HealthFetched(api.bucket_health().await),
        EngineCommand::VerifyAll => ClientEvent::VerifyFinished(api.verify_all().await),
    };
    let _ = event_tx.send(event);
}

async fn run_upload(api: &dyn StorageApi, source: UploadSource) -> Result<(), ApiError> {
    match source {
        UploadSource::PickedFile { path } => {
            let filename = path
                .file_name()
                .and_then(|name| name.to_str())
                .map(str::to_owned)
                .ok_or_else(|| {
                    ApiError::new(FailureKind::Io, "picked path has no usable file name")
                })?;
            let bytes = tokio::fs::read(&path).await.map_err(|err| {
                ApiError::new(FailureKind::Io, format!("read {}: {err}", path.display()))
            })?;
            api.upload(&filename, "application/octet-stream", bytes).await
        }
        UploadSource::InlineText { filename, text } => {
            // The typed draft becomes a real file only at this point.
            api.upload(&filename, "text/plain", text.into_bytes()).await
        }
    }
}
