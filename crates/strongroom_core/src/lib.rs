//! Strongroom core: pure state machine and view-model helpers.
mod effect;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{DownloadSource, DownloadTarget, Effect, UploadSource};
pub use msg::Msg;
pub use state::{
    AppState, BucketHealthState, BucketReport, FileId, FileRecord, GateState, NoticeKind,
    UploadDraft, UploadMode, VerifyRow, VerifyState, NOTICE_TICKS,
};
pub use update::update;
pub use view_model::{
    AppViewModel, CopyBadge, FileRowView, NoticeView, PendingDeleteView, VerifyBanner,
};
