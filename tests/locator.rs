// tests/locator.rs
//
// Row Locator behavior against a scripted page: pagination order and bound,
// region-tab leniency, expansion, and field extraction.

mod common;

use common::{FakeSite, detail, world_row};
use sietch_watch::config::options::ServerKey;
use sietch_watch::locate::{LocateError, locate};

fn key(region: &str, world: &str, sietch: &str) -> ServerKey {
    ServerKey::new(region, world, sietch)
}

fn tabr_details() -> Vec<Vec<String>> {
    vec![
        detail(&["Sietch Jacurutu", "Public", "Standard", "412/1000\n41.2%"]),
        detail(&["Sietch Tabr", "Public\nLocked", "High Pop", "973/1000\n97.3%"]),
    ]
}

#[test]
fn finds_world_and_extracts_fields() {
    let mut site = FakeSite::new(vec![vec![
        world_row("Caladan", vec![]),
        world_row("Arrakis", tabr_details()),
    ]]);
    let st = locate(&mut site, &key("North America", "Arrakis", "Tabr")).unwrap();
    assert!((st.occupancy_pct - 97.3).abs() < 1e-6);
    assert_eq!(st.mode, "HighPop");
    assert!(st.locked);
}

#[test]
fn world_match_is_exact_and_case_insensitive() {
    let mut site = FakeSite::new(vec![vec![
        world_row("Arrakis Prime", tabr_details()),
        world_row("ARRAKIS", tabr_details()),
    ]]);
    assert!(locate(&mut site, &key("North America", "arrakis", "tabr")).is_ok());

    // A prefix is not a match
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis Prime", tabr_details())]]);
    assert!(matches!(
        locate(&mut site, &key("North America", "Arrakis", "Tabr")),
        Err(LocateError::NotFound)
    ));
}

#[test]
fn sietch_matches_as_substring_of_any_cell() {
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", tabr_details())]]);
    let st = locate(&mut site, &key("North America", "Arrakis", "jacurutu")).unwrap();
    assert!(!st.locked);
    assert!((st.occupancy_pct - 41.2).abs() < 1e-6);
    assert_eq!(st.mode, "Standard");
}

#[test]
fn walks_pages_in_order_and_stops_at_match() {
    let mut site = FakeSite::new(vec![
        vec![world_row("Caladan", vec![])],
        vec![world_row("Giedi Prime", vec![])],
        vec![world_row("Arrakis", tabr_details())],
        vec![world_row("Kaitain", vec![])],
    ]);
    locate(&mut site, &key("North America", "Arrakis", "Tabr")).unwrap();
    assert_eq!(site.pages_scanned, vec![0, 1, 2]);
}

#[test]
fn pagination_gives_up_after_ten_pages() {
    let mut site = FakeSite::new(vec![vec![world_row("Caladan", vec![])]]).endless_next();
    let res = locate(&mut site, &key("North America", "Arrakis", "Tabr"));
    assert!(matches!(res, Err(LocateError::NotFound)));
    assert_eq!(site.pages_scanned.len(), 10);
    assert_eq!(site.pauses, 10); // one settle per page turn
}

#[test]
fn missing_next_control_stops_the_scan() {
    let mut site = FakeSite::new(vec![vec![world_row("Caladan", vec![])]]);
    let res = locate(&mut site, &key("North America", "Arrakis", "Tabr"));
    assert!(matches!(res, Err(LocateError::NotFound)));
    assert_eq!(site.pages_scanned, vec![0]);
}

#[test]
fn unmatched_region_searches_the_active_tab() {
    // Leniency is deliberate: a region with no tab still gets a full scan.
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", tabr_details())]]);
    let st = locate(&mut site, &key("Oceania", "Arrakis", "Tabr"));
    assert!(st.is_ok());
    assert_eq!(site.tab_clicks, 0);
}

#[test]
fn inactive_region_tab_gets_clicked_once() {
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", tabr_details())]]);
    locate(&mut site, &key("europe", "Arrakis", "Tabr")).unwrap();
    assert_eq!(site.tab_clicks, 1);
    assert!(site.tabs[1].selected);
    assert!(site.pauses >= 1); // settled after the switch
}

#[test]
fn active_region_tab_is_not_reclicked() {
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", tabr_details())]]);
    locate(&mut site, &key("north america", "Arrakis", "Tabr")).unwrap();
    assert_eq!(site.tab_clicks, 0);
}

#[test]
fn row_without_expand_button_is_a_miss() {
    let row = common::FakeRow {
        world: String::from("Arrakis"),
        has_button: false,
        details: tabr_details(),
    };
    let mut site = FakeSite::new(vec![vec![row]]);
    let res = locate(&mut site, &key("North America", "Arrakis", "Tabr"));
    assert!(matches!(res, Err(LocateError::NotFound)));
}

#[test]
fn unknown_sietch_in_panel_is_a_miss() {
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", tabr_details())]]);
    let res = locate(&mut site, &key("North America", "Arrakis", "Red Wall"));
    assert!(matches!(res, Err(LocateError::NotFound)));
}

#[test]
fn bad_capacity_text_is_malformed_not_missing() {
    let details = vec![detail(&["Sietch Tabr", "Public", "Standard", "n/a"])];
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", details)]]);
    let res = locate(&mut site, &key("North America", "Arrakis", "Tabr"));
    match res {
        Err(LocateError::Malformed(e)) => assert_eq!(e.text, "n/a"),
        other => panic!("expected Malformed, got {other:?}"),
    }
}

#[test]
fn ratio_capacity_scales_to_percent() {
    let details = vec![detail(&["Sietch Tabr", "Public", "Standard", "973/1000\n0.973"])];
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", details)]]);
    let st = locate(&mut site, &key("North America", "Arrakis", "Tabr")).unwrap();
    assert!((st.occupancy_pct - 97.3).abs() < 1e-6);
}

#[test]
fn short_detail_rows_are_skipped() {
    let details = vec![
        detail(&["Sietch Tabr", "Public"]), // truncated row, same sietch
        detail(&["Sietch Tabr", "Public", "Standard", "50%"]),
    ];
    let mut site = FakeSite::new(vec![vec![world_row("Arrakis", details)]]);
    let st = locate(&mut site, &key("North America", "Arrakis", "Tabr")).unwrap();
    assert!((st.occupancy_pct - 50.0).abs() < 1e-6);
}
