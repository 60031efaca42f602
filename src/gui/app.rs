// src/gui/app.rs
use std::error::Error;
use std::sync::{Arc, Mutex, mpsc};
use std::thread;

use eframe::egui;

use crate::{
    config::options::{MonitorOptions, ServerKey},
    monitor::{self, CycleOutcome, MonitorEvent, MonitorHandle},
    series::Series,
};

use super::{components, progress::GuiProgress};

pub fn run(options: eframe::NativeOptions) -> Result<(), Box<dyn Error>> {
    eframe::run_native(
        "Sietch Watch",
        options,
        Box::new(|cc| {
            cc.egui_ctx.set_visuals(egui::Visuals::dark());
            Ok(Box::new(App::new()))
        }),
    )?;
    Ok(())
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum View {
    Settings,
    Connecting,
    ConnectFailed,
    Monitoring,
}

pub struct App {
    // settings form (single source of truth, UI thread only)
    pub region: String,
    pub world: String,
    pub sietch: String,

    pub view: View,

    // status line (workers write here)
    pub status: Arc<Mutex<String>>,
    pub connect_error: String,

    // pre-flight check result channel
    preflight: Option<mpsc::Receiver<Result<(), String>>>,

    // steady-state session
    handle: Option<MonitorHandle>,
    pub series: Series,
    pub last_outcome: Option<CycleOutcome>,
}

impl App {
    pub fn new() -> Self {
        Self {
            region: s!(crate::config::consts::REGIONS[0]),
            world: s!(),
            sietch: s!(),
            view: View::Settings,
            status: Arc::new(Mutex::new(s!("Idle"))),
            connect_error: s!(),
            preflight: None,
            handle: None,
            series: Series::new(),
            last_outcome: None,
        }
    }

    pub fn key(&self) -> ServerKey {
        ServerKey::new(&self.region, &self.world, &self.sietch)
    }

    #[inline]
    pub fn status<T: Into<String>>(&self, msg: T) {
        *self.status.lock().unwrap() = msg.into();
    }

    pub fn status_text(&self) -> String {
        self.status.lock().unwrap().clone()
    }

    /// Kick off the one-shot connectivity check on a worker thread.
    pub fn start_preflight(&mut self, ctx: &egui::Context) {
        let key = self.key();
        let (tx, rx) = mpsc::channel();
        let ctx2 = ctx.clone();
        let mut prog = GuiProgress::new(Arc::clone(&self.status));

        logf!("UI: pre-flight for {}", key.title());
        thread::spawn(move || {
            let res = monitor::preflight(&key, Some(&mut prog));
            let _ = tx.send(res);
            ctx2.request_repaint();
        });

        self.preflight = Some(rx);
        self.view = View::Connecting;
    }

    fn start_monitor(&mut self, ctx: &egui::Context) {
        let key = self.key();
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(key.title()));

        let ctx2 = ctx.clone();
        self.series = Series::new();
        self.last_outcome = None;
        let options = MonitorOptions { key, ..MonitorOptions::default() };
        self.handle = Some(monitor::spawn(options, move || ctx2.request_repaint()));
        self.status("Polling...");
        self.view = View::Monitoring;
    }

    /// Ends the session; the series goes with it.
    pub fn stop_monitor(&mut self, ctx: &egui::Context) {
        self.handle = None; // drop raises the stop flag
        self.series = Series::new();
        self.last_outcome = None;
        self.status("Idle");
        ctx.send_viewport_cmd(egui::ViewportCommand::Title(s!("Sietch Watch")));
        self.view = View::Settings;
    }

    /// Drain worker → UI channels. Appends happen worker-side; here we only
    /// swap in complete snapshots, so a torn series can never render.
    fn pump_events(&mut self, ctx: &egui::Context) {
        let checked = match &self.preflight {
            Some(rx) => match rx.try_recv() {
                Ok(res) => Some(res),
                Err(mpsc::TryRecvError::Empty) => None,
                Err(mpsc::TryRecvError::Disconnected) => {
                    Some(Err(s!("Connection check never answered")))
                }
            },
            None => None,
        };
        match checked {
            Some(Ok(())) => {
                self.preflight = None;
                self.start_monitor(ctx);
            }
            Some(Err(msg)) => {
                loge!("UI: pre-flight failed: {}", msg.replace('\n', " "));
                self.preflight = None;
                self.connect_error = msg;
                self.view = View::ConnectFailed;
            }
            None => {}
        }

        if let Some(handle) = &self.handle {
            let mut fault = None;
            while let Ok(event) = handle.rx.try_recv() {
                match event {
                    MonitorEvent::Cycle { series, outcome } => {
                        self.series = series;
                        self.last_outcome = Some(outcome);
                    }
                    MonitorEvent::Fault(msg) => fault = Some(msg),
                }
            }
            match self.last_outcome {
                Some(CycleOutcome::Observed) => {
                    self.status(format!("{} observation(s)", self.series.len()))
                }
                Some(CycleOutcome::Missed) => self.status("Last cycle found nothing"),
                None => {}
            }
            if let Some(msg) = fault {
                self.status(format!("Session fault: {msg}"));
            }
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.pump_events(ctx);

        egui::CentralPanel::default().show(ctx, |ui| match self.view {
            View::Settings => components::settings::draw(ui, self),
            View::Connecting => components::connect::draw_connecting(ui, self),
            View::ConnectFailed => components::connect::draw_failed(ui, self),
            View::Monitoring => components::chart_view::draw(ui, self),
        });
    }
}
