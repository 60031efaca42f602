// src/config/consts.rs

// Status page
pub const STATUS_URL: &str = "https://dunestatus.com/?type=public";

// Local WebDriver endpoint (chromedriver default port; any W3C driver works)
pub const WEBDRIVER_URL: &str = "http://localhost:9515";

// Region tabs known to the listing
pub const REGIONS: [&str; 5] = [
    "North America",
    "Europe",
    "Asia",
    "Oceania",
    "South America",
];

// Polling
pub const POLL_PERIOD_SECS: u64 = 180;
pub const STOP_CHECK_MS: u64 = 250; // stop-flag granularity while sleeping

// Locator waits
pub const TABLIST_TIMEOUT_MS: u64 = 5_000;
pub const FIRST_ROW_TIMEOUT_MS: u64 = 10_000;
pub const SETTLE_MS: u64 = 1_000; // after tab switch / page turn / row expand
pub const MAX_PAGES: usize = 10;

// Chart canvas (logical units)
pub const CHART_W: f32 = 800.0;
pub const CHART_H: f32 = 400.0;
pub const CHART_PAD: f32 = 50.0;

// Display range defaults: the chart never shows less than this band
pub const RANGE_FLOOR: f64 = 95.0;
pub const RANGE_CEIL: f64 = 105.0;
