use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;

/// One stored file as the list endpoint reports it.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FileEntry {
    pub id: String,
    pub filename: String,
}

/// The two server-side storage targets holding the same logical file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageCopy {
    Primary,
    Backup,
}

impl fmt::Display for StorageCopy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageCopy::Primary => write!(f, "primary"),
            StorageCopy::Backup => write!(f, "backup"),
        }
    }
}

/// How a download should pick its copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    Primary,
    Backup,
    /// Primary first; backup exactly once if the primary response fails.
    Safe,
}

/// Decoded `/health/buckets` response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketHealth {
    pub primary_ok: bool,
    pub backup_ok: bool,
}

/// One row of the `/verify/both` report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyEntry {
    pub filename: String,
    pub primary_ok: bool,
    pub backup_ok: bool,
}

/// Where a completed download was served from and where it landed on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReceipt {
    pub served_from: StorageCopy,
    pub path: PathBuf,
    pub byte_len: u64,
}

/// What an upload request should carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A file picked from disk; the engine reads the bytes.
    PickedFile { path: PathBuf },
    /// A plain-text file synthesized from typed content.
    InlineText { filename: String, text: String },
}

/// Completion events the engine reports back over its channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientEvent {
    ProbeFinished {
        healthy: bool,
    },
    ListFetched(Result<Vec<FileEntry>, ApiError>),
    UploadFinished(Result<(), ApiError>),
    /// A safe download's primary attempt failed; backup is being tried.
    DownloadFellBack {
        filename: String,
    },
    DownloadFinished {
        filename: String,
        result: Result<DownloadReceipt, ApiError>,
    },
    DeleteFinished(Result<(), ApiError>),
    HealthFetched(Result<BucketHealth, ApiError>),
    VerifyFinished(Result<Vec<VerifyEntry>, ApiError>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    /// The server refused the request and said why in a JSON `{error}` body.
    Rejected,
    Timeout,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    /// Safe download: both the primary and the backup copy failed.
    AllCopiesFailed,
    /// Local filesystem failure while reading an upload or saving a download.
    Io,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Rejected => write!(f, "rejected by server"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::AllCopiesFailed => write!(f, "all copies failed"),
            FailureKind::Io => write!(f, "io failure"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}
