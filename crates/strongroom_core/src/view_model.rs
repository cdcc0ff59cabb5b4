use crate::state::{BucketHealthState, GateState, NoticeKind, UploadMode};

/// Render snapshot; the shell never reaches into `AppState` directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub gate: GateState,
    pub files: Vec<FileRowView>,
    pub file_count: usize,
    pub notice: Option<NoticeView>,
    pub busy: bool,
    pub upload_mode: UploadMode,
    pub picked_path: Option<String>,
    pub draft_filename: String,
    pub draft_text: String,
    pub pending_delete: Option<PendingDeleteView>,
    pub bucket_health: BucketHealthState,
    pub verify: VerifyBanner,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRowView {
    pub id: String,
    pub filename: String,
    /// Per-copy verification badge, when a current report covers this file.
    pub copies: Option<CopyBadge>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CopyBadge {
    pub primary_ok: bool,
    pub backup_ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeView {
    pub message: String,
    pub kind: NoticeKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteView {
    pub id: String,
    pub filename: String,
}

/// Summary line over the whole verification report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerifyBanner {
    #[default]
    Idle,
    Running,
    AllVerified,
    SomeCorrupted,
    Unavailable,
}
