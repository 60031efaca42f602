// src/locate.rs
// Finds one world's row across the tabbed, paginated listing, expands it,
// and pulls the target sietch's fields out of the detail panel.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::config::consts::{
    FIRST_ROW_TIMEOUT_MS, MAX_PAGES, SETTLE_MS, STATUS_URL, TABLIST_TIMEOUT_MS,
};
use crate::config::options::ServerKey;
use crate::extract::{self, MalformedField};
use crate::query::{Elem, PageQuery, QueryError};

// Selectors, per the live page markup.
const TABLIST_SEL: &str = r#"[role="tablist"]"#;
const TAB_SEL: &str = r#"[role="tablist"] button[role="tab"]"#;
const ROW_SEL: &str = "table tbody tr";
const NAME_CELL_SEL: &str = "td:nth-child(2)";
const PAGER_SEL: &str = "button.inline-flex";
const DETAIL_ROW_SEL: &str = "table tr";
const CELL_SEL: &str = "td";

// Detail-row cell layout: [name, status, mode, capacity]
const STATUS_CELL: usize = 1;
const MODE_CELL: usize = 2;
const CAPACITY_CELL: usize = 3;

#[derive(Debug)]
pub enum LocateError {
    /// The key matched nothing. Bounded waits running out and missing
    /// sub-structure (no expand button, no detail panel) land here too;
    /// callers only care that this cycle produced no row.
    NotFound,
    /// A matched capacity cell would not parse.
    Malformed(MalformedField),
    /// The query backend itself failed.
    Query(QueryError),
}

impl fmt::Display for LocateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocateError::NotFound => write!(f, "world or sietch not found"),
            LocateError::Malformed(e) => write!(f, "{e}"),
            LocateError::Query(e) => write!(f, "query failed: {e}"),
        }
    }
}

impl Error for LocateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LocateError::NotFound => None,
            LocateError::Malformed(e) => Some(e),
            LocateError::Query(e) => Some(e),
        }
    }
}

/// What one successful lookup yields; the poller adds the timestamp.
#[derive(Clone, Debug, PartialEq)]
pub struct SietchStatus {
    pub occupancy_pct: f64,
    pub mode: String,
    pub locked: bool,
}

/// One full lookup: navigate, pick the region tab, walk up to ten pages for
/// the world row, expand it, scan its detail rows for the sietch.
pub fn locate(page: &mut dyn PageQuery, key: &ServerKey) -> Result<SietchStatus, LocateError> {
    page.goto(STATUS_URL).map_err(fold)?;
    wait(page, TABLIST_SEL, TABLIST_TIMEOUT_MS)?;
    select_region_tab(page, &key.region)?;
    wait(page, ROW_SEL, FIRST_ROW_TIMEOUT_MS)?;

    let world = key.world.trim().to_lowercase();
    for page_no in 0..MAX_PAGES {
        for row in page.query_all(ROW_SEL).map_err(fold)? {
            let Some(name_cell) = first_in(page, &row, NAME_CELL_SEL)? else {
                continue;
            };
            let name = page.text(&name_cell).map_err(fold)?;
            if name.trim().to_lowercase() == world {
                logd!("Locate: world {:?} on page {}", key.world, page_no + 1);
                return expand_and_scan(page, &row, &key.sietch);
            }
        }

        // "Next" is the last of two-or-more pager buttons; a lone button
        // means we are on the only (or last reachable) page.
        let pagers = page.query_all(PAGER_SEL).map_err(fold)?;
        match pagers.last() {
            Some(next) if pagers.len() >= 2 => {
                page.click(next).map_err(fold)?;
                settle(page);
            }
            _ => break,
        }
    }
    Err(LocateError::NotFound)
}

/// Pick the tab whose label contains the region name (case-insensitive).
/// No matching tab is not an error: we search whatever tab is active.
fn select_region_tab(page: &mut dyn PageQuery, region: &str) -> Result<(), LocateError> {
    let want = region.trim().to_lowercase();
    for tab in page.query_all(TAB_SEL).map_err(fold)? {
        let label = page.text(&tab).map_err(fold)?;
        if !label.trim().to_lowercase().contains(&want) {
            continue;
        }
        let selected = page.attr(&tab, "aria-selected").map_err(fold)?;
        if selected.as_deref() != Some("true") {
            page.click(&tab).map_err(fold)?;
            settle(page);
        }
        return Ok(());
    }
    logd!("Locate: no tab matches region {:?}, searching active tab", region);
    Ok(())
}

fn expand_and_scan(
    page: &mut dyn PageQuery,
    row: &Elem,
    sietch: &str,
) -> Result<SietchStatus, LocateError> {
    let toggle = first_in(page, row, "button")?.ok_or(LocateError::NotFound)?;
    page.click(&toggle).map_err(fold)?;
    settle(page);

    let panel = page
        .next_sibling(row)
        .map_err(fold)?
        .ok_or(LocateError::NotFound)?;

    let want = sietch.trim().to_lowercase();
    for detail in page.query_all_in(&panel, DETAIL_ROW_SEL).map_err(fold)? {
        let mut texts = Vec::new();
        for cell in page.query_all_in(&detail, CELL_SEL).map_err(fold)? {
            texts.push(s!(page.text(&cell).map_err(fold)?.trim()));
        }
        if texts.len() <= CAPACITY_CELL {
            continue;
        }
        if !texts.iter().any(|t| t.to_lowercase().contains(&want)) {
            continue;
        }
        let locked = extract::is_locked(&texts[STATUS_CELL]);
        let mode = extract::normalize_mode(&texts[MODE_CELL]);
        let occupancy_pct = extract::parse_occupancy(extract::last_line(&texts[CAPACITY_CELL]))
            .map_err(LocateError::Malformed)?;
        return Ok(SietchStatus { occupancy_pct, mode, locked });
    }
    Err(LocateError::NotFound)
}

fn first_in(
    page: &mut dyn PageQuery,
    scope: &Elem,
    css: &str,
) -> Result<Option<Elem>, LocateError> {
    Ok(page.query_all_in(scope, css).map_err(fold)?.into_iter().next())
}

fn wait(page: &mut dyn PageQuery, css: &str, timeout_ms: u64) -> Result<(), LocateError> {
    page.wait_for(css, Duration::from_millis(timeout_ms)).map_err(fold)
}

fn settle(page: &mut dyn PageQuery) {
    page.pause(Duration::from_millis(SETTLE_MS));
}

/// Timeouts collapse into a lookup miss; everything else stays a backend
/// fault worth seeing in the log.
fn fold(e: QueryError) -> LocateError {
    match e {
        QueryError::Timeout { ref selector, waited } => {
            logd!("Locate: wait for {:?} ran out after {:?}", selector, waited);
            LocateError::NotFound
        }
        other => LocateError::Query(other),
    }
}
