// src/extract.rs
// Field normalizers for the status table cells. Pure, stateless.

use std::error::Error;
use std::fmt;

/// Exact status-cell text of a locked sietch. Anything else means unlocked,
/// including a bare "Public".
pub const LOCKED_LITERAL: &str = "Public\nLocked";

/// A matched cell that would not parse. Distinct from a plain lookup miss
/// because it usually means the page format moved under us.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MalformedField {
    pub text: String,
}

impl fmt::Display for MalformedField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed occupancy value: {:?}", self.text)
    }
}

impl Error for MalformedField {}

/// Last line of a multi-line cell; the whole cell if it has no line breaks.
pub fn last_line(cell: &str) -> &str {
    cell.lines().next_back().unwrap_or(cell)
}

/// The capacity cell reports either a percentage ("97%") or a 0–1 ratio
/// ("0.973"), keyed on the presence of '%'. Upstream has flip-flopped on
/// this; if they ever report whole-number counts without '%' this silently
/// scales them wrong, so the branch is kept as dumb as the page itself.
pub fn parse_occupancy(raw: &str) -> Result<f64, MalformedField> {
    let t = raw.trim();
    let parsed = if t.contains('%') {
        t.trim_end_matches('%').trim().parse::<f64>()
    } else {
        t.parse::<f64>().map(|v| v * 100.0)
    };
    parsed.map_err(|_| MalformedField { text: s!(raw) })
}

/// Mode label with every whitespace character removed ("High Pop" → "HighPop").
pub fn normalize_mode(raw: &str) -> String {
    raw.chars().filter(|c| !c.is_whitespace()).collect()
}

/// True iff the status cell is literally the two-line locked marker.
pub fn is_locked(status_cell: &str) -> bool {
    status_cell == LOCKED_LITERAL
}
