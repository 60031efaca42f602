// src/series.rs
// Append-only record of what the poller has seen this session.

use std::time::SystemTime;

use crate::config::consts::{RANGE_CEIL, RANGE_FLOOR};

/// One successful poll cycle. Immutable once appended.
#[derive(Clone, Debug, PartialEq)]
pub struct Observation {
    pub at: SystemTime,
    pub occupancy_pct: f64,
    pub mode: String,
    pub locked: bool,
}

/// Chronological by construction: polling is strictly sequential and failed
/// cycles append nothing. Grows for the life of the session; sessions are
/// short enough that we never trim.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Series {
    points: Vec<Observation>,
}

impl Series {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, obs: Observation) {
        self.points.push(obs);
    }

    pub fn latest(&self) -> Option<&Observation> {
        self.points.last()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Observation> {
        self.points.iter()
    }

    /// Vertical band the chart should show: at least [95, 105], widened to
    /// cover every observed value.
    pub fn range(&self) -> DisplayRange {
        if self.points.is_empty() {
            return DisplayRange::default();
        }
        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for p in &self.points {
            lo = lo.min(p.occupancy_pct);
            hi = hi.max(p.occupancy_pct);
        }
        DisplayRange {
            vmin: lo.min(RANGE_FLOOR),
            vmax: hi.max(RANGE_CEIL),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DisplayRange {
    pub vmin: f64,
    pub vmax: f64,
}

impl DisplayRange {
    pub fn contains(&self, v: f64) -> bool {
        self.vmin <= v && v <= self.vmax
    }
}

impl Default for DisplayRange {
    fn default() -> Self {
        Self { vmin: RANGE_FLOOR, vmax: RANGE_CEIL }
    }
}
