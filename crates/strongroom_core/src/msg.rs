use crate::effect::{DownloadSource, DownloadTarget};
use crate::state::{BucketReport, FileId, FileRecord, UploadMode, VerifyRow};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Shell finished starting up; time to probe the service root.
    Launched,
    /// Result of the root probe. Any 2xx counts as healthy.
    ProbeFinished { healthy: bool },
    /// User clicked retry on the unreachable screen.
    RetryClicked,
    /// Full file list arrived (or failed); replaces the cache wholesale.
    ListFetched(Result<Vec<FileRecord>, String>),
    /// User switched between picking a file and typing one.
    UploadModeSelected(UploadMode),
    /// User picked a file for upload, or cleared the pick.
    UploadPathPicked(Option<String>),
    /// User edited the filename for a typed text file.
    DraftFilenameChanged(String),
    /// User edited the content for a typed text file.
    DraftTextChanged(String),
    /// User submitted the upload form.
    UploadClicked,
    /// Engine finished the upload request.
    UploadFinished(Result<(), String>),
    /// User asked for a file from a named storage target.
    DownloadClicked {
        id: FileId,
        filename: String,
        target: DownloadTarget,
    },
    /// A safe download's primary attempt failed; backup is being tried.
    DownloadFellBack { filename: String },
    /// Engine finished a download, reporting which copy served it.
    DownloadFinished {
        filename: String,
        result: Result<DownloadSource, String>,
    },
    /// User clicked delete on a row; opens the confirmation exchange.
    DeleteClicked { id: FileId, filename: String },
    /// User confirmed the pending delete.
    DeleteConfirmed,
    /// User dismissed the pending delete.
    DeleteDismissed,
    /// Engine finished the delete request.
    DeleteFinished(Result<(), String>),
    /// User asked for a fresh bucket-health poll.
    HealthRefreshClicked,
    /// Bucket-health poll finished.
    HealthFetched(Result<BucketReport, String>),
    /// User started the verification sweep.
    VerifyClicked,
    /// Verification sweep finished.
    VerifyFinished(Result<Vec<VerifyRow>, String>),
    /// User dismissed the notification toast.
    NoticeDismissed,
    /// UI tick to age the notification slot.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
