use std::path::PathBuf;
use std::sync::Arc;

use client_logging::{client_info, client_warn};

use crate::api::StorageApi;
use crate::persist::AtomicFileWriter;
use crate::types::{
    ApiError, ClientEvent, DownloadReceipt, DownloadTarget, FailureKind, StorageCopy,
};

/// Outlet for mid-flight events (currently only the safe-mode fallback).
pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: ClientEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<ClientEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<ClientEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: ClientEvent) {
        let _ = self.tx.send(event);
    }
}

/// Retrieves file bodies from the chosen storage copy and lands them in the
/// download directory.
pub struct Downloader {
    api: Arc<dyn StorageApi>,
    writer: AtomicFileWriter,
}

impl Downloader {
    pub fn new(api: Arc<dyn StorageApi>, download_dir: PathBuf) -> Self {
        Self {
            api,
            writer: AtomicFileWriter::new(download_dir),
        }
    }

    /// Fetches one file and saves it under its listed name. Safe mode tries
    /// the primary copy and falls back to the backup exactly once, reporting
    /// the fallback through `sink` and the serving copy in the receipt.
    pub async fn fetch(
        &self,
        id: &str,
        filename: &str,
        target: DownloadTarget,
        sink: &dyn ProgressSink,
    ) -> Result<DownloadReceipt, ApiError> {
        let (body, served_from) = match target {
            DownloadTarget::Primary => (
                self.api.download(id, StorageCopy::Primary).await?,
                StorageCopy::Primary,
            ),
            DownloadTarget::Backup => (
                self.api.download(id, StorageCopy::Backup).await?,
                StorageCopy::Backup,
            ),
            DownloadTarget::Safe => match self.api.download(id, StorageCopy::Primary).await {
                Ok(body) => (body, StorageCopy::Primary),
                Err(primary_err) => {
                    client_warn!(
                        "primary copy of {} failed ({}), trying backup",
                        id,
                        primary_err
                    );
                    sink.emit(ClientEvent::DownloadFellBack {
                        filename: filename.to_string(),
                    });
                    match self.api.download(id, StorageCopy::Backup).await {
                        Ok(body) => (body, StorageCopy::Backup),
                        Err(backup_err) => {
                            return Err(ApiError::new(
                                FailureKind::AllCopiesFailed,
                                format!("primary: {primary_err}; backup: {backup_err}"),
                            ));
                        }
                    }
                }
            },
        };

        let local_name = sanitize_filename(filename);
        let path = self
            .writer
            .write(&local_name, &body)
            .map_err(|err| ApiError::new(FailureKind::Io, err.to_string()))?;
        client_info!(
            "saved {} ({} bytes) from {} storage to {:?}",
            filename,
            body.len(),
            served_from,
            path
        );

        Ok(DownloadReceipt {
            served_from,
            path,
            byte_len: body.len() as u64,
        })
    }
}

/// Keeps only the final path component so a listed name cannot escape the
/// download directory.
fn sanitize_filename(filename: &str) -> String {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename)
        .trim();
    if name.is_empty() || name == "." || name == ".." {
        "download.bin".to_string()
    } else {
        name.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::sanitize_filename;

    #[test]
    fn sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("notes.txt"), "notes.txt");
    }

    #[test]
    fn sanitize_strips_path_components() {
        assert_eq!(sanitize_filename("../../etc/passwd"), "passwd");
        assert_eq!(sanitize_filename("dir\\evil.exe"), "evil.exe");
    }

    #[test]
    fn sanitize_rejects_empty_and_dot_names() {
        assert_eq!(sanitize_filename("a/"), "download.bin");
        assert_eq!(sanitize_filename(".."), "download.bin");
        assert_eq!(sanitize_filename("   "), "download.bin");
    }
}
