//! Strongroom client engine: storage-service HTTP calls and effect execution.
mod api;
mod download;
mod engine;
mod persist;
mod types;

pub use api::{ClientSettings, ReqwestStorageApi, StorageApi, DEFAULT_BASE_URL};
pub use download::{ChannelProgressSink, Downloader, ProgressSink};
pub use engine::EngineHandle;
pub use persist::{ensure_download_dir, AtomicFileWriter, PersistError};
pub use types::{
    ApiError, BucketHealth, ClientEvent, DownloadReceipt, DownloadTarget, FailureKind, FileEntry,
    StorageCopy, UploadSource, VerifyEntry,
};
