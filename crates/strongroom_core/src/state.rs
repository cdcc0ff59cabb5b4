use crate::view_model::{
    AppViewModel, CopyBadge, FileRowView, NoticeView, PendingDeleteView, VerifyBanner,
};

/// Opaque identifier assigned by the backend.
pub type FileId = String;

/// One stored file as reported by the list endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    pub id: FileId,
    pub filename: String,
}

/// Page-level gate: a single probe decides it for the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    #[default]
    Loading,
    Connected,
    Unreachable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// Ticks a notice stays visible. The shell ticks every ~75 ms, so 40 is
/// roughly three seconds.
pub const NOTICE_TICKS: u32 = 40;

#[derive(Debug, Clone, PartialEq, Eq)]
struct Notice {
    message: String,
    kind: NoticeKind,
    ticks_left: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UploadMode {
    #[default]
    File,
    Text,
}

/// What the user has staged for upload. Only the fields for the active mode
/// matter; the rest are kept so switching modes doesn't lose input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadDraft {
    pub mode: UploadMode,
    pub picked_path: Option<String>,
    pub filename: String,
    pub text: String,
}

/// Last bucket-health poll, or the poll in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketHealthState {
    #[default]
    Unknown,
    Checking,
    Ready { primary_ok: bool, backup_ok: bool },
    Unavailable,
}

/// Decoded bucket-health response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketReport {
    pub primary_ok: bool,
    pub backup_ok: bool,
}

/// One row of the verification report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyRow {
    pub filename: String,
    pub primary_ok: bool,
    pub backup_ok: bool,
}

/// Verification display. Any list change discards the report, since it
/// refers to a superseded set of files.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum VerifyState {
    #[default]
    Idle,
    Running,
    Verified(Vec<VerifyRow>),
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    gate: GateState,
    files: Vec<FileRecord>,
    notice: Option<Notice>,
    draft: UploadDraft,
    busy: bool,
    pending_delete: Option<FileRecord>,
    bucket_health: BucketHealthState,
    verify: VerifyState,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gate(&self) -> GateState {
        self.gate
    }

    pub(crate) fn set_gate(&mut self, gate: GateState) {
        if self.gate != gate {
            self.gate = gate;
            self.mark_dirty();
        }
    }

    pub fn files(&self) -> &[FileRecord] {
        &self.files
    }

    /// Replaces the cached list wholesale and discards the stale
    /// verification report.
    pub(crate) fn replace_files(&mut self, files: Vec<FileRecord>) {
        self.files = files;
        self.verify = VerifyState::Idle;
        self.mark_dirty();
    }

    pub(crate) fn show_notice(&mut self, message: impl Into<String>, kind: NoticeKind) {
        self.notice = Some(Notice {
            message: message.into(),
            kind,
            ticks_left: NOTICE_TICKS,
        });
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Ages the notice by one tick; clears it when the lifetime runs out.
    pub(crate) fn age_notice(&mut self) {
        let expired = match &mut self.notice {
            Some(notice) => {
                notice.ticks_left = notice.ticks_left.saturating_sub(1);
                notice.ticks_left == 0
            }
            None => false,
        };
        if expired {
            self.notice = None;
            self.mark_dirty();
        }
    }

    pub fn draft(&self) -> &UploadDraft {
        &self.draft
    }

    pub(crate) fn select_upload_mode(&mut self, mode: UploadMode) {
        if self.draft.mode != mode {
            self.draft.mode = mode;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_picked_path(&mut self, path: Option<String>) {
        self.draft.picked_path = path;
        self.mark_dirty();
    }

    pub(crate) fn set_draft_filename(&mut self, filename: String) {
        self.draft.filename = filename;
        self.mark_dirty();
    }

    pub(crate) fn set_draft_text(&mut self, text: String) {
        self.draft.text = text;
        self.mark_dirty();
    }

    /// Clears the inputs of the mode that was just submitted.
    pub(crate) fn clear_submitted_draft(&mut self) {
        match self.draft.mode {
            UploadMode::File => self.draft.picked_path = None,
            UploadMode::Text => {
                self.draft.filename.clear();
                self.draft.text.clear();
            }
        }
        self.mark_dirty();
    }

    pub fn busy(&self) -> bool {
        self.busy
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        if self.busy != busy {
            self.busy = busy;
            self.mark_dirty();
        }
    }

    pub fn pending_delete(&self) -> Option<&FileRecord> {
        self.pending_delete.as_ref()
    }

    pub(crate) fn request_delete(&mut self, file: FileRecord) {
        self.pending_delete = Some(file);
        self.mark_dirty();
    }

    pub(crate) fn take_pending_delete(&mut self) -> Option<FileRecord> {
        let taken = self.pending_delete.take();
        if taken.is_some() {
            self.mark_dirty();
        }
        taken
    }

    pub(crate) fn cancel_pending_delete(&mut self) {
        if self.pending_delete.take().is_some() {
            self.mark_dirty();
        }
    }

    pub fn bucket_health(&self) -> BucketHealthState {
        self.bucket_health
    }

    pub(crate) fn set_bucket_health(&mut self, health: BucketHealthState) {
        if self.bucket_health != health {
            self.bucket_health = health;
            self.mark_dirty();
        }
    }

    pub fn verify(&self) -> &VerifyState {
        &self.verify
    }

    pub(crate) fn set_verify(&mut self, verify: VerifyState) {
        self.verify = verify;
        self.mark_dirty();
    }

    /// Returns true exactly once per batch of visible changes; the shell
    /// re-renders only when this fires.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::replace(&mut self.dirty, false)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn view(&self) -> AppViewModel {
        let files = self
            .files
            .iter()
            .map(|file| FileRowView {
                id: file.id.clone(),
                filename: file.filename.clone(),
                copies: self.copy_badge(&file.filename),
            })
            .collect::<Vec<_>>();

        AppViewModel {
            gate: self.gate,
            file_count: files.len(),
            files,
            notice: self.notice.as_ref().map(|notice| NoticeView {
                message: notice.message.clone(),
                kind: notice.kind,
            }),
            busy: self.busy,
            upload_mode: self.draft.mode,
            picked_path: self.draft.picked_path.clone(),
            draft_filename: self.draft.filename.clone(),
            draft_text: self.draft.text.clone(),
            pending_delete: self.pending_delete.as_ref().map(|file| PendingDeleteView {
                id: file.id.clone(),
                filename: file.filename.clone(),
            }),
            bucket_health: self.bucket_health,
            verify: self.verify_banner(),
        }
    }

    fn copy_badge(&self, filename: &str) -> Option<CopyBadge> {
        match &self.verify {
            VerifyState::Verified(rows) => rows
                .iter()
                .find(|row| row.filename == filename)
                .map(|row| CopyBadge {
                    primary_ok: row.primary_ok,
                    backup_ok: row.backup_ok,
                }),
            _ => None,
        }
    }

    fn verify_banner(&self) -> VerifyBanner {
        match &self.verify {
            VerifyState::Idle => VerifyBanner::Idle,
            VerifyState::Running => VerifyBanner::Running,
            VerifyState::Verified(rows) => {
                if rows.iter().all(|row| row.primary_ok && row.backup_ok) {
                    VerifyBanner::AllVerified
                } else {
                    VerifyBanner::SomeCorrupted
                }
            }
            VerifyState::Unavailable => VerifyBanner::Unavailable,
        }
    }
}
