use chrono::{DateTime, Local};
use eframe::egui;
use strongroom_core::{
    AppViewModel, BucketHealthState, DownloadTarget, FileRowView, Msg, NoticeKind, UploadMode,
    VerifyBanner,
};

const OK_GREEN: egui::Color32 = egui::Color32::from_rgb(0x4c, 0xaf, 0x50);
const FAIL_RED: egui::Color32 = egui::Color32::from_rgb(0xe5, 0x39, 0x35);
const INFO_GRAY: egui::Color32 = egui::Color32::from_rgb(0x90, 0xa4, 0xae);

pub fn main_panel(
    ctx: &egui::Context,
    view: &AppViewModel,
    health_checked_at: Option<DateTime<Local>>,
    outbox: &mut Vec<Msg>,
) {
    egui::TopBottomPanel::top("header").show(ctx, |ui| {
        ui.add_space(6.0);
        ui.vertical_centered(|ui| {
            ui.heading("Strongroom");
            ui.label("Multi-bucket file storage with verification");
            ui.horizontal(|ui| {
                ui.add_space(ui.available_width() / 2.0 - 60.0);
                ui.colored_label(OK_GREEN, "●");
                ui.small("Server connected");
            });
        });
        ui.add_space(6.0);
    });

    egui::CentralPanel::default().show(ctx, |ui| {
        egui::ScrollArea::vertical().show(ui, |ui| {
            health_section(ui, view, health_checked_at, outbox);
            ui.separator();
            upload_section(ui, view, outbox);
            ui.separator();
            file_section(ui, view, outbox);
        });
    });
}

fn health_section(
    ui: &mut egui::Ui,
    view: &AppViewModel,
    checked_at: Option<DateTime<Local>>,
    outbox: &mut Vec<Msg>,
) {
    ui.horizontal(|ui| {
        ui.strong("Storage health");
        let checking = view.bucket_health == BucketHealthState::Checking;
        if ui
            .add_enabled(!checking, egui::Button::new("Refresh").small())
            .clicked()
        {
            outbox.push(Msg::HealthRefreshClicked);
        }
        if let Some(at) = checked_at {
            ui.small(format!("checked {}", at.format("%H:%M:%S")));
        }
    });

    match view.bucket_health {
        BucketHealthState::Unknown => {
            ui.small("Not checked yet.");
        }
        BucketHealthState::Checking => {
            ui.horizontal(|ui| {
                ui.add(egui::Spinner::new());
                ui.small("Checking storage health...");
            });
        }
        BucketHealthState::Ready {
            primary_ok,
            backup_ok,
        } => {
            ui.horizontal(|ui| {
                bucket_dot(ui, "Primary storage", primary_ok);
                ui.add_space(16.0);
                bucket_dot(ui, "Backup storage", backup_ok);
            });
        }
        BucketHealthState::Unavailable => {
            ui.colored_label(INFO_GRAY, "Unable to check storage health");
        }
    }
}

fn bucket_dot(ui: &mut egui::Ui, label: &str, ok: bool) {
    let color = if ok { OK_GREEN } else { FAIL_RED };
    ui.colored_label(color, "●");
    ui.label(label);
}

fn upload_section(ui: &mut egui::Ui, view: &AppViewModel, outbox: &mut Vec<Msg>) {
    ui.strong("Upload a new file");
    ui.horizontal(|ui| {
        if ui
            .selectable_label(view.upload_mode == UploadMode::File, "Upload file")
            .clicked()
        {
            outbox.push(Msg::UploadModeSelected(UploadMode::File));
        }
        if ui
            .selectable_label(view.upload_mode == UploadMode::Text, "Create text file")
            .clicked()
        {
            outbox.push(Msg::UploadModeSelected(UploadMode::Text));
        }
    });

    match view.upload_mode {
        UploadMode::File => {
            ui.horizontal(|ui| {
                if ui.button("Choose file...").clicked() {
                    let picked = rfd::FileDialog::new()
                        .set_title("Choose a file to upload")
                        .pick_file();
                    outbox.push(Msg::UploadPathPicked(
                        picked.map(|path| path.display().to_string()),
                    ));
                }
                match &view.picked_path {
                    Some(path) => ui.monospace(path),
                    None => ui.small("No file chosen"),
                };
                if ui
                    .add_enabled(!view.busy, egui::Button::new(upload_label(view.busy)))
                    .clicked()
                {
                    outbox.push(Msg::UploadClicked);
                }
            });
        }
        UploadMode::Text => {
            ui.label("File name (with extension, e.g. notes.txt)");
            let mut filename = view.draft_filename.clone();
            if ui.text_edit_singleline(&mut filename).changed() {
                outbox.push(Msg::DraftFilenameChanged(filename));
            }

            ui.label("Text content");
            let mut text = view.draft_text.clone();
            let editor = egui::TextEdit::multiline(&mut text)
                .desired_rows(8)
                .desired_width(f32::INFINITY)
                .hint_text("Paste or type the file content here...");
            if ui.add(editor).changed() {
                outbox.push(Msg::DraftTextChanged(text));
            }
            ui.small(format!(
                "Characters: {}",
                view.draft_text.chars().count()
            ));

            if ui
                .add_enabled(!view.busy, egui::Button::new(upload_label(view.busy)))
                .clicked()
            {
                outbox.push(Msg::UploadClicked);
            }
        }
    }
}

fn upload_label(busy: bool) -> &'static str {
    if busy {
        "Uploading..."
    } else {
        "Upload"
    }
}

fn file_section(ui: &mut egui::Ui, view: &AppViewModel, outbox: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        ui.strong(format!("Stored files ({})", view.file_count));
        match view.verify {
            VerifyBanner::Idle => {
                if ui.small_button("Verify all").clicked() {
                    outbox.push(Msg::VerifyClicked);
                }
            }
            VerifyBanner::Running => {
                ui.add(egui::Spinner::new());
                ui.small("Verifying all...");
            }
            VerifyBanner::AllVerified => {
                ui.colored_label(OK_GREEN, "✔ All verified");
            }
            VerifyBanner::SomeCorrupted => {
                ui.colored_label(FAIL_RED, "✖ Corruption detected");
            }
            VerifyBanner::Unavailable => {
                ui.colored_label(INFO_GRAY, "Verification unavailable");
                if ui.small_button("Retry").clicked() {
                    outbox.push(Msg::VerifyClicked);
                }
            }
        }
    });

    if view.files.is_empty() {
        ui.add_space(16.0);
        ui.vertical_centered(|ui| {
            ui.small("No files have been uploaded yet.");
        });
        return;
    }

    for row in &view.files {
        file_row(ui, row, view.busy, outbox);
    }
}

fn file_row(ui: &mut egui::Ui, row: &FileRowView, busy: bool, outbox: &mut Vec<Msg>) {
    ui.horizontal(|ui| {
        ui.vertical(|ui| {
            ui.strong(&row.filename);
            ui.small(format!("ID: {}", row.id));
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui
                .add_enabled(!busy, egui::Button::new("Delete").small())
                .clicked()
            {
                outbox.push(Msg::DeleteClicked {
                    id: row.id.clone(),
                    filename: row.filename.clone(),
                });
            }

            ui.menu_button("Download", |ui| {
                for (label, target) in [
                    ("Primary storage", DownloadTarget::Primary),
                    ("Backup storage", DownloadTarget::Backup),
                    ("Safe mode (auto)", DownloadTarget::Safe),
                ] {
                    if ui.button(label).clicked() {
                        outbox.push(Msg::DownloadClicked {
                            id: row.id.clone(),
                            filename: row.filename.clone(),
                            target,
                        });
                        ui.close_menu();
                    }
                }
            });

            if let Some(copies) = row.copies {
                bucket_dot(ui, "backup", copies.backup_ok);
                bucket_dot(ui, "primary", copies.primary_ok);
            }
        });
    });
}

/// Transient toast in the corner; replaced by each new notice, auto-expires
/// in the core.
pub fn notification(ctx: &egui::Context, view: &AppViewModel, outbox: &mut Vec<Msg>) {
    let Some(notice) = &view.notice else {
        return;
    };
    let color = match notice.kind {
        NoticeKind::Success => OK_GREEN,
        NoticeKind::Error => FAIL_RED,
        NoticeKind::Info => INFO_GRAY,
    };

    egui::Area::new(egui::Id::new("notice_toast"))
        .anchor(egui::Align2::RIGHT_TOP, [-16.0, 16.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.colored_label(color, &notice.message);
                    if ui.small_button("✕").clicked() {
                        outbox.push(Msg::NoticeDismissed);
                    }
                });
            });
        });
}

/// Modal confirmation; deletion only proceeds through the confirm button.
pub fn confirm_delete(ctx: &egui::Context, view: &AppViewModel, outbox: &mut Vec<Msg>) {
    let Some(pending) = &view.pending_delete else {
        return;
    };

    egui::Window::new("Confirm deletion")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.label(format!(
                "Delete \"{}\"? Both stored copies will be removed.",
                pending.filename
            ));
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                if ui.button("Cancel").clicked() {
                    outbox.push(Msg::DeleteDismissed);
                }
                let confirm = egui::Button::new(egui::RichText::new("Delete").color(FAIL_RED));
                if ui.add_enabled(!view.busy, confirm).clicked() {
                    outbox.push(Msg::DeleteConfirmed);
                }
            });
        });
}
