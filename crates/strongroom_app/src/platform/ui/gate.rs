use eframe::egui;
use strongroom_core::Msg;

/// Full-screen wait view while the single connectivity probe is in flight.
pub fn loading(ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.vertical_centered(|ui| {
            ui.add(egui::Spinner::new().size(40.0));
            ui.add_space(12.0);
            ui.heading("Starting server");
            ui.label(
                "Connecting to the file service. A cold start can take close to a minute.",
            );
        });
    });
}

/// Full-screen error view; the only way out is the manual retry.
pub fn unreachable(ctx: &egui::Context, outbox: &mut Vec<Msg>) {
    egui::CentralPanel::default().show(ctx, |ui| {
        ui.add_space(ui.available_height() * 0.35);
        ui.vertical_centered(|ui| {
            ui.heading("Server unavailable");
            ui.label("Unable to connect to the file server. Please try again later.");
            ui.add_space(12.0);
            if ui.button("Retry connection").clicked() {
                outbox.push(Msg::RetryClicked);
            }
        });
    });
}
