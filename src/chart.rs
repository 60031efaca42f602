// src/chart.rs
// Pure chart geometry: series in, draw primitives out. The GUI paints these
// verbatim, so a redraw with unchanged data is pixel-identical.

use std::time::{SystemTime, UNIX_EPOCH};

use crate::config::consts::{CHART_H, CHART_PAD, CHART_W};
use crate::config::options::ServerKey;
use crate::series::{DisplayRange, Series};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pt {
    pub x: f32,
    pub y: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Center,
    Right,
}

/// Colour role; the painter maps these onto the palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Ok,
    Alert,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    pub at: Pt,
    pub text: String,
    pub anchor: Anchor,
    pub tone: Tone,
    pub strong: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Canvas {
    pub width: f32,
    pub height: f32,
    pub pad: f32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self { width: CHART_W, height: CHART_H, pad: CHART_PAD }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Geometry {
    /// Solid axis lines.
    pub axes: Vec<(Pt, Pt)>,
    /// Dashed 100% reference line, present only while 100 is in range.
    pub reference: Option<(Pt, Pt)>,
    pub labels: Vec<Label>,
    /// Connected series line; empty unless there are two or more points.
    pub polyline: Vec<Pt>,
    pub markers: Vec<Pt>,
    pub marker_radius: f32,
}

/// Lay out the whole chart for the current series. Pure; call it as often
/// as you like.
pub fn layout(canvas: &Canvas, key: &ServerKey, series: &Series) -> Geometry {
    let Canvas { width: w, height: h, pad } = *canvas;
    let range = series.range();
    let mut geo = Geometry { marker_radius: 2.0, ..Geometry::default() };

    // Headers
    geo.labels.push(label(pad, pad / 2.0, format!("Region: {}", key.region), Anchor::Left, Tone::Plain, true));
    geo.labels.push(label(w / 2.0 - pad * 1.33, pad / 2.0, format!("World: {}", key.world), Anchor::Left, Tone::Plain, true));
    geo.labels.push(label(w - pad, pad / 2.0, format!("Sietch: {}", key.sietch), Anchor::Right, Tone::Plain, true));

    // Axes
    geo.axes.push((pt(pad, pad), pt(pad, h - pad)));
    geo.axes.push((pt(pad, h - pad), pt(w - pad, h - pad)));

    // 100% reference line
    if range.contains(100.0) {
        let y100 = y_at(canvas, 100.0, range);
        geo.reference = Some((pt(pad, y100), pt(w - pad, y100)));
        geo.labels.push(label(pad - 10.0, y100, s!("100%"), Anchor::Right, Tone::Alert, false));
    }

    // Range labels
    geo.labels.push(label(pad - 10.0, y_at(canvas, range.vmin, range), format!("{:.1}%", range.vmin), Anchor::Right, Tone::Plain, false));
    geo.labels.push(label(pad - 10.0, y_at(canvas, range.vmax, range), format!("{:.1}%", range.vmax), Anchor::Right, Tone::Plain, false));

    if series.is_empty() {
        return geo;
    }

    // Series line and markers
    let t0 = stamp(series.iter().next().map(|o| o.at));
    let t1 = stamp(series.latest().map(|o| o.at));
    for obs in series.iter() {
        let p = pt(
            x_at(canvas, stamp(Some(obs.at)), t0, t1),
            y_at(canvas, obs.occupancy_pct, range),
        );
        geo.markers.push(p);
    }
    if geo.markers.len() >= 2 {
        geo.polyline = geo.markers.clone();
    }

    // Footer for the latest observation
    if let Some(last) = series.latest() {
        let by = h - pad / 2.0;
        geo.labels.push(label(pad, by, format!("Mode: {}", last.mode), Anchor::Left, Tone::Plain, true));
        geo.labels.push(label(w - pad, by, format!("Capacity: {:.1}%", last.occupancy_pct), Anchor::Right, Tone::Plain, true));
        let (text, tone) = if last.locked {
            (s!("SIETCH LOCKED"), Tone::Alert)
        } else {
            (s!("SIETCH UNLOCKED"), Tone::Ok)
        };
        geo.labels.push(label(w / 2.0, by, text, Anchor::Center, tone, true));
    }

    geo
}

fn pt(x: f32, y: f32) -> Pt {
    Pt { x, y }
}

fn label(x: f32, y: f32, text: String, anchor: Anchor, tone: Tone, strong: bool) -> Label {
    Label { at: pt(x, y), text, anchor, tone, strong }
}

fn stamp(at: Option<SystemTime>) -> f64 {
    at.and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs_f64())
        .unwrap_or(0.0)
}

/// Linear time → x; collapses to the left edge when the span is degenerate.
fn x_at(canvas: &Canvas, t: f64, t0: f64, t1: f64) -> f32 {
    if t1 > t0 {
        let frac = ((t - t0) / (t1 - t0)) as f32;
        canvas.pad + frac * (canvas.width - 2.0 * canvas.pad)
    } else {
        canvas.pad
    }
}

/// Linear value → y within the display range, inverted: higher occupancy
/// sits higher on screen.
fn y_at(canvas: &Canvas, v: f64, range: DisplayRange) -> f32 {
    let base = canvas.height - canvas.pad;
    if range.vmax > range.vmin {
        let frac = ((v - range.vmin) / (range.vmax - range.vmin)) as f32;
        base - frac * (canvas.height - 2.0 * canvas.pad)
    } else {
        base
    }
}
