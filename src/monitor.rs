// src/monitor.rs
// The poll scheduler: one session, one cycle at a time, forever until told
// to stop. A failed cycle leaves a gap in the series, never aborts polling.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, SystemTime};

use crate::config::consts::{STOP_CHECK_MS, WEBDRIVER_URL};
use crate::config::options::{MonitorOptions, ServerKey};
use crate::locate::{self, LocateError};
use crate::progress::Progress;
use crate::query::{PageQuery, WebDriverPage};
use crate::series::{Observation, Series};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleOutcome {
    /// A fresh observation was appended.
    Observed,
    /// Nothing matched this cycle; the series is untouched.
    Missed,
}

/// One monitoring session: the key being watched and everything observed so
/// far. The series lives and dies with this value.
pub struct Monitor {
    key: ServerKey,
    series: Series,
    cycles: usize,
}

impl Monitor {
    pub fn new(key: ServerKey) -> Self {
        Self { key, series: Series::new(), cycles: 0 }
    }

    pub fn key(&self) -> &ServerKey {
        &self.key
    }

    pub fn series(&self) -> &Series {
        &self.series
    }

    /// Cycles attempted so far, observed or not.
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    /// One poll cycle. Every failure mode maps to `Missed`; the caller
    /// re-renders and schedules the next cycle regardless.
    pub fn tick(&mut self, page: &mut dyn PageQuery) -> CycleOutcome {
        self.cycles += 1;
        match locate::locate(page, &self.key) {
            Ok(st) => {
                logf!(
                    "Poll: cycle {} observed {:.1}% mode={} locked={}",
                    self.cycles, st.occupancy_pct, st.mode, st.locked
                );
                self.series.append(Observation {
                    at: SystemTime::now(),
                    occupancy_pct: st.occupancy_pct,
                    mode: st.mode,
                    locked: st.locked,
                });
                CycleOutcome::Observed
            }
            Err(LocateError::NotFound) => {
                logd!("Poll: cycle {} found nothing", self.cycles);
                CycleOutcome::Missed
            }
            Err(e) => {
                loge!("Poll: cycle {} failed: {}", self.cycles, e);
                CycleOutcome::Missed
            }
        }
    }
}

/// One-shot lookup before a session starts. Unlike steady-state polling this
/// is allowed to give up; the user decides whether to retry. The browser
/// session is its own and is released on every exit path.
pub fn preflight(key: &ServerKey, mut progress: Option<&mut dyn Progress>) -> Result<(), String> {
    if let Some(p) = progress.as_deref_mut() {
        p.log("Connecting to server...");
    }
    let result = (|| {
        let mut page = WebDriverPage::connect(WEBDRIVER_URL).map_err(|e| e.to_string())?;
        match locate::locate(&mut page, key) {
            Ok(_) => Ok(()),
            Err(LocateError::NotFound) => {
                Err(s!("World or Sietch not found.\nDid you type it correctly?"))
            }
            Err(e) => Err(e.to_string()),
        }
    })();
    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    result
}

/// What the worker hands the frontend after each cycle. The series snapshot
/// is complete, so the frontend never shares live state with the worker.
pub enum MonitorEvent {
    Cycle { series: Series, outcome: CycleOutcome },
    Fault(String),
}

pub struct MonitorHandle {
    pub rx: mpsc::Receiver<MonitorEvent>,
    stop: Arc<AtomicBool>,
}

impl MonitorHandle {
    /// Honored between cycles, not mid-cycle.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }
}

impl Drop for MonitorHandle {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Spawn the steady-state polling loop on a worker thread. Each cycle ends
/// with a snapshot over the channel; `notify` pokes the frontend awake.
pub fn spawn(options: MonitorOptions, notify: impl Fn() + Send + 'static) -> MonitorHandle {
    let (tx, rx) = mpsc::channel();
    let stop = Arc::new(AtomicBool::new(false));
    let stop_w = Arc::clone(&stop);

    thread::spawn(move || {
        let MonitorOptions { key, poll_period } = options;
        logf!("Poll: session start for {}", key.title());
        let mut page = match WebDriverPage::connect(WEBDRIVER_URL) {
            Ok(p) => p,
            Err(e) => {
                loge!("Poll: browser session failed: {}", e);
                let _ = tx.send(MonitorEvent::Fault(e.to_string()));
                notify();
                return;
            }
        };

        let mut monitor = Monitor::new(key);
        loop {
            if stop_w.load(Ordering::Relaxed) {
                break;
            }
            let outcome = monitor.tick(&mut page);
            let event = MonitorEvent::Cycle {
                series: monitor.series().clone(),
                outcome,
            };
            if tx.send(event).is_err() {
                break; // frontend is gone
            }
            notify();
            if sleep_until_stopped(poll_period, &stop_w) {
                break;
            }
        }
        logf!("Poll: session stopped after {} observation(s)", monitor.series().len());
    });

    MonitorHandle { rx, stop }
}

/// Sliced sleep; returns true if the stop flag was raised while sleeping.
fn sleep_until_stopped(total: Duration, stop: &AtomicBool) -> bool {
    let slice = Duration::from_millis(STOP_CHECK_MS);
    let mut left = total;
    while !left.is_zero() {
        if stop.load(Ordering::Relaxed) {
            return true;
        }
        let nap = left.min(slice);
        thread::sleep(nap);
        left -= nap;
    }
    stop.load(Ordering::Relaxed)
}
