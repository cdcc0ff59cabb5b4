use crate::state::FileId;

/// Side effects requested by `update`; the shell executes them on the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Probe the service root once to decide the gate.
    ProbeServer,
    /// Fetch the full file list.
    FetchList,
    /// Send one file (picked or synthesized) as a multipart upload.
    Upload { source: UploadSource },
    /// Retrieve one file from the named target and save it locally.
    Download {
        id: FileId,
        filename: String,
        target: DownloadTarget,
    },
    /// Delete one file by identifier.
    Delete { id: FileId },
    /// Poll per-bucket reachability.
    CheckBucketHealth,
    /// Run the per-file, per-copy verification sweep.
    VerifyAll,
}

/// What the upload request should carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    /// A file picked from disk; the engine reads the bytes.
    PickedFile { path: String },
    /// A plain-text file synthesized from typed content.
    InlineText { filename: String, text: String },
}

/// Which storage copy a download should be served from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadTarget {
    Primary,
    Backup,
    /// Primary first, backup exactly once if the primary response fails.
    Safe,
}

/// The copy that actually served a completed download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadSource {
    Primary,
    Backup,
}
