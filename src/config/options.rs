// src/config/options.rs
use std::time::Duration;

use super::consts::{POLL_PERIOD_SECS, REGIONS};

/// What to watch: a sietch inside a world inside a region tab.
/// All three fields match case-insensitively against the listing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerKey {
    pub region: String,
    pub world: String,
    pub sietch: String,
}

impl ServerKey {
    pub fn new(region: &str, world: &str, sietch: &str) -> Self {
        Self {
            region: s!(region.trim()),
            world: s!(world.trim()),
            sietch: s!(sietch.trim()),
        }
    }

    /// A session may only start once all three parts are filled in.
    pub fn is_complete(&self) -> bool {
        !self.region.trim().is_empty()
            && !self.world.trim().is_empty()
            && !self.sietch.trim().is_empty()
    }

    /// Window-title form: "Region / World / Sietch"
    pub fn title(&self) -> String {
        format!("{} / {} / {}", self.region, self.world, self.sietch)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonitorOptions {
    pub key: ServerKey,
    pub poll_period: Duration,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            key: ServerKey::new(REGIONS[0], "", ""),
            poll_period: Duration::from_secs(POLL_PERIOD_SECS),
        }
    }
}
