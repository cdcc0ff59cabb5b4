use std::path::Path;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

use chrono::{DateTime, Local};
use client_logging::client_error;
use eframe::egui;
use strongroom_core::{update, AppState, Msg};

use super::config;
use super::effects::EffectRunner;
use super::logging::{self, LogDestination};
use super::ui;

pub fn run_app() -> eframe::Result {
    logging::initialize(LogDestination::Both);

    let config = config::load(Path::new("."));
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();

    let runner = match EffectRunner::new(&config, msg_tx.clone()) {
        Ok(runner) => runner,
        Err(err) => {
            client_error!("engine failed to start: {}", err);
            eprintln!("strongroom: engine failed to start: {err}");
            return Ok(());
        }
    };

    // Background tick to age the notification slot.
    {
        let tick_tx = msg_tx.clone();
        thread::spawn(move || {
            let interval = Duration::from_millis(75);
            while tick_tx.send(Msg::Tick).is_ok() {
                thread::sleep(interval);
            }
        });
    }

    // Kick off the connectivity gate before the first frame.
    let _ = msg_tx.send(Msg::Launched);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([900.0, 680.0])
            .with_min_inner_size([520.0, 420.0])
            .with_title("Strongroom"),
        ..Default::default()
    };

    eframe::run_native(
        "Strongroom",
        options,
        Box::new(move |_cc| Ok(Box::new(StrongroomApp::new(msg_rx, runner)))),
    )
}

struct StrongroomApp {
    state: AppState,
    msg_rx: mpsc::Receiver<Msg>,
    runner: EffectRunner,
    last_health_check: Option<DateTime<Local>>,
}

impl StrongroomApp {
    fn new(msg_rx: mpsc::Receiver<Msg>, runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            msg_rx,
            runner,
            last_health_check: None,
        }
    }

    fn drain_messages(&mut self) {
        let mut inbox = Vec::new();
        while let Ok(msg) = self.msg_rx.try_recv() {
            inbox.push(msg);
        }
        for msg in inbox {
            self.dispatch(msg);
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        if matches!(msg, Msg::HealthFetched(Ok(_))) {
            self.last_health_check = Some(Local::now());
        }
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }
}

impl eframe::App for StrongroomApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.drain_messages();

        let view = self.state.view();
        let mut outbox = Vec::new();
        ui::render(ctx, &view, self.last_health_check, &mut outbox);
        for msg in outbox {
            self.dispatch(msg);
        }

        if self.state.consume_dirty() {
            ctx.request_repaint();
        } else {
            // Idle cadence: pick up ticks and engine events between frames.
            ctx.request_repaint_after(Duration::from_millis(75));
        }
    }
}
