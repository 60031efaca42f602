// src/progress.rs
/// Lightweight progress reporting for long-running operations (pre-flight
/// check, steady-state polling). Frontends (GUI/CLI) implement this to
/// surface status to users.
pub trait Progress {
    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called when one poll cycle completes, observed or not.
    fn cycle_done(&mut self, _cycle: usize, _observed: bool) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
