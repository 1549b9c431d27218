//! `gs25-scraper` -- crawls the GS25 event-goods page and writes a CSV.
//!
//! Requires a running WebDriver server (chromedriver or selenium) at
//! `WEBDRIVER_URL`. See [`ScraperConfig::from_env`] for all settings.

use std::process::ExitCode;

use gs25_scraper::browser::WebDriverPage;
use gs25_scraper::config::ScraperConfig;
use gs25_scraper::crawler::Crawler;
use gs25_scraper::export;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gs25_scraper=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = match ScraperConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Invalid scraper configuration");
            return ExitCode::FAILURE;
        }
    };
    tracing::info!(
        url = %config.url,
        webdriver_url = %config.webdriver_url,
        crawl_all_pages = config.crawl_all_pages,
        max_pages = config.max_pages,
        tab = ?config.event_tab.map(|t| t.code()),
        "Loaded scraper configuration",
    );

    let page = match WebDriverPage::connect(
        &config.webdriver_url,
        config.headless,
        config.wait_time,
        config.settle,
    )
    .await
    {
        Ok(page) => page,
        Err(e) => {
            tracing::error!(error = %e, "Could not start browser session");
            return ExitCode::FAILURE;
        }
    };

    let crawler = Crawler::new(page, config.crawl_options());
    let report = match config.event_tab {
        Some(tab) => crawler.run_single(tab).await,
        None => crawler.run_all().await,
    };

    export::summarize(&report);

    match export::write_csv(&config.output_dir, &report.products, &chrono::Local::now()) {
        Ok(Some(path)) => {
            tracing::info!(path = %path.display(), total = report.products.len(), "Crawl complete");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Failed to write results");
            ExitCode::FAILURE
        }
    }
}
