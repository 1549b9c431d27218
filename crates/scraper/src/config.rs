use std::path::PathBuf;
use std::time::Duration;

use gs25_core::promotion::EventTab;

use crate::crawler::CrawlOptions;
use crate::error::{ScrapeError, ScrapeResult};

/// Event-goods page crawled by default.
pub const DEFAULT_URL: &str = "http://gs25.gsretail.com/gscvs/ko/products/event-goods#;";

/// Scraper configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Event-goods page URL.
    pub url: String,
    /// WebDriver endpoint (chromedriver / selenium).
    pub webdriver_url: String,
    /// Follow the last-page link to find the page count instead of using `max_pages`.
    pub crawl_all_pages: bool,
    /// Page cap per tab when the last page is unknown or `crawl_all_pages` is off.
    pub max_pages: u32,
    /// Upper bound for polling waits on DOM readiness.
    pub wait_time: Duration,
    /// Fixed pause after navigation and clicks.
    pub settle: Duration,
    pub output_dir: PathBuf,
    /// Crawl only this tab; `None` crawls all three.
    pub event_tab: Option<EventTab>,
    pub headless: bool,
}

impl ScraperConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var           | Default                    |
    /// |-------------------|----------------------------|
    /// | `SCRAPER_URL`     | [`DEFAULT_URL`]            |
    /// | `WEBDRIVER_URL`   | `http://localhost:4444`    |
    /// | `CRAWL_ALL_PAGES` | `true`                     |
    /// | `MAX_PAGES`       | `50`                       |
    /// | `WAIT_TIME_SECS`  | `15`                       |
    /// | `SETTLE_SECS`     | `3`                        |
    /// | `OUTPUT_DIR`      | `gs25_results`             |
    /// | `EVENT_TAB`       | unset (all tabs)           |
    /// | `HEADLESS`        | `true`                     |
    pub fn from_env() -> ScrapeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> ScrapeResult<Self> {
        let url = lookup("SCRAPER_URL").unwrap_or_else(|| DEFAULT_URL.into());
        let webdriver_url =
            lookup("WEBDRIVER_URL").unwrap_or_else(|| "http://localhost:4444".into());
        let crawl_all_pages = parse_bool("CRAWL_ALL_PAGES", lookup("CRAWL_ALL_PAGES"), true)?;
        let max_pages: u32 = parse_num("MAX_PAGES", lookup("MAX_PAGES"), 50)?;
        let wait_secs: u64 = parse_num("WAIT_TIME_SECS", lookup("WAIT_TIME_SECS"), 15)?;
        let settle_secs: u64 = parse_num("SETTLE_SECS", lookup("SETTLE_SECS"), 3)?;
        let output_dir = lookup("OUTPUT_DIR").unwrap_or_else(|| "gs25_results".into());
        let headless = parse_bool("HEADLESS", lookup("HEADLESS"), true)?;

        let event_tab = match lookup("EVENT_TAB").filter(|v| !v.trim().is_empty()) {
            Some(code) => Some(code.parse::<EventTab>()?),
            None => None,
        };

        if max_pages == 0 {
            return Err(ScrapeError::Config("MAX_PAGES must be at least 1".into()));
        }

        Ok(Self {
            url,
            webdriver_url,
            crawl_all_pages,
            max_pages,
            wait_time: Duration::from_secs(wait_secs),
            settle: Duration::from_secs(settle_secs),
            output_dir: PathBuf::from(output_dir),
            event_tab,
            headless,
        })
    }

    /// The subset of settings the crawl loop needs.
    pub fn crawl_options(&self) -> CrawlOptions {
        CrawlOptions {
            url: self.url.clone(),
            crawl_all_pages: self.crawl_all_pages,
            max_pages: self.max_pages,
            settle: self.settle,
        }
    }
}

fn parse_num<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> ScrapeResult<T> {
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ScrapeError::Config(format!("{key} must be a non-negative integer, got '{raw}'"))),
        None => Ok(default),
    }
}

fn parse_bool(key: &str, value: Option<String>, default: bool) -> ScrapeResult<bool> {
    match value.as_deref().map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None => Ok(default),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(other) => Err(ScrapeError::Config(format!("{key} must be a boolean, got '{other}'"))),
    }
}
