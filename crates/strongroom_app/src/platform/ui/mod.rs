mod gate;
mod panels;

use chrono::{DateTime, Local};
use eframe::egui;
use strongroom_core::{AppViewModel, GateState, Msg};

/// Renders one frame and collects the user's intents into `outbox`.
pub fn render(
    ctx: &egui::Context,
    view: &AppViewModel,
    health_checked_at: Option<DateTime<Local>>,
    outbox: &mut Vec<Msg>,
) {
    match view.gate {
        GateState::Loading => gate::loading(ctx),
        GateState::Unreachable => gate::unreachable(ctx, outbox),
        GateState::Connected => panels::main_panel(ctx, view, health_checked_at, outbox),
    }

    // The toast and the confirm dialog float over whichever view is active.
    panels::notification(ctx, view, outbox);
    panels::confirm_delete(ctx, view, outbox);
}
