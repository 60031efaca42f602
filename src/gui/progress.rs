// src/gui/progress.rs
use std::sync::{Arc, Mutex};

use crate::progress::Progress;

/// Routes progress lines into the status text the GUI renders each frame.
pub struct GuiProgress {
    status: Arc<Mutex<String>>,
}

impl GuiProgress {
    pub fn new(status: Arc<Mutex<String>>) -> Self {
        Self { status }
    }
    fn set_status(&self, msg: impl Into<String>) {
        *self.status.lock().unwrap() = msg.into();
    }
}

impl Progress for GuiProgress {
    fn log(&mut self, msg: &str) {
        self.set_status(s!(msg));
    }
    fn cycle_done(&mut self, cycle: usize, observed: bool) {
        let what = if observed { "new point" } else { "no data" };
        self.set_status(format!("Cycle {}: {}", cycle, what));
    }
    fn finish(&mut self) {
        self.set_status(s!("Done"));
    }
}
