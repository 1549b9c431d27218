//! Tab-by-tab, page-by-page crawl of the event-goods page.
//!
//! Failures are contained at the narrowest level that still lets the run
//! make progress: a bad card is skipped, a failed page move ends the
//! current tab, and a failed tab moves on to the next one.

use std::collections::HashSet;
use std::time::Duration;

use gs25_core::product::ProductRow;
use gs25_core::promotion::EventTab;

use crate::browser::EventPage;
use crate::error::ScrapeResult;
use crate::extract::{extract_last_page, extract_products, has_next_button};

/// Settings for one crawl run.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    pub url: String,
    pub crawl_all_pages: bool,
    pub max_pages: u32,
    /// Fixed pause after navigation and tab clicks.
    pub settle: Duration,
}

/// Outcome of a crawl.
#[derive(Debug, Default, Clone)]
pub struct CrawlReport {
    /// Unique products in the order they were first seen.
    pub products: Vec<ProductRow>,
    /// Products dropped because a product with the same name was already kept.
    pub duplicates: usize,
    /// Product cards skipped for missing fields.
    pub skipped: usize,
    /// Tabs that failed part-way and were abandoned.
    pub failed_tabs: Vec<EventTab>,
}

impl CrawlReport {
    /// Product count per category, in first-seen order.
    pub fn per_category(&self) -> Vec<(String, usize)> {
        let mut counts: Vec<(String, usize)> = Vec::new();
        for product in &self.products {
            match counts.iter_mut().find(|(c, _)| *c == product.category) {
                Some((_, n)) => *n += 1,
                None => counts.push((product.category.clone(), 1)),
            }
        }
        counts
    }
}

/// Drives an [`EventPage`] through the promotion tabs.
pub struct Crawler<P: EventPage> {
    page: P,
    options: CrawlOptions,
    seen_names: HashSet<String>,
    report: CrawlReport,
}

impl<P: EventPage> Crawler<P> {
    pub fn new(page: P, options: CrawlOptions) -> Self {
        Self {
            page,
            options,
            seen_names: HashSet::new(),
            report: CrawlReport::default(),
        }
    }

    /// Crawl every tab in [`EventTab::ALL`] order.
    pub async fn run_all(self) -> CrawlReport {
        self.run(&EventTab::ALL).await
    }

    /// Crawl a single tab.
    pub async fn run_single(self, tab: EventTab) -> CrawlReport {
        self.run(&[tab]).await
    }

    async fn run(mut self, tabs: &[EventTab]) -> CrawlReport {
        if let Err(e) = self.crawl_tabs(tabs).await {
            tracing::error!(error = %e, "Crawl aborted");
        }
        if let Err(e) = self.page.close().await {
            tracing::warn!(error = %e, "Failed to close browser session");
        }
        self.report
    }

    async fn crawl_tabs(&mut self, tabs: &[EventTab]) -> ScrapeResult<()> {
        self.page.open(&self.options.url).await?;
        self.page.wait_ready().await?;
        self.settle().await;

        let tab_count = self.page.count_tabs().await?;
        if tab_count == 0 {
            tracing::warn!("No promotion tabs found on the page");
            return Ok(());
        }
        tracing::info!(tab_count, "Found promotion tabs");

        for (i, &tab) in tabs.iter().enumerate() {
            tracing::info!(tab = %tab, "Crawling tab");
            if let Err(e) = self.crawl_tab(tab).await {
                tracing::error!(tab = %tab, error = %e, "Tab failed, moving on");
                self.report.failed_tabs.push(tab);
            }
            if i + 1 < tabs.len() {
                self.settle().await;
            }
        }
        Ok(())
    }

    async fn crawl_tab(&mut self, tab: EventTab) -> ScrapeResult<()> {
        self.page.refresh().await?;
        self.settle().await;

        self.page.click_tab(tab).await?;
        self.settle().await;

        if !self.page.is_tab_active(tab).await? {
            tracing::warn!(tab = %tab, "Tab not active after click, retrying");
            self.page.click_tab(tab).await?;
            self.settle().await;
        }

        let Some(mut html) = self.page.visible_list_html().await? else {
            tracing::warn!(tab = %tab, "No visible product list for tab");
            return Ok(());
        };

        let mut total_pages = self.options.max_pages;
        if self.options.crawl_all_pages {
            match extract_last_page(&html) {
                Some(last) => {
                    total_pages = last;
                    tracing::info!(tab = %tab, total_pages, "Detected page count");
                }
                None => tracing::info!(
                    tab = %tab,
                    total_pages,
                    "Page count not advertised, using configured cap",
                ),
            }
        }

        let mut current = 1;
        loop {
            let page = extract_products(&html, tab.display_name());
            self.report.skipped += page.skipped;

            if page.products.is_empty() {
                tracing::info!(tab = %tab, page = current, "Page has no products, ending tab");
                break;
            }

            let found = page.products.len();
            self.add_unique(page.products);
            tracing::info!(tab = %tab, page = current, total_pages, found, "Page crawled");

            if current >= total_pages {
                tracing::info!(tab = %tab, page = current, "Reached last page");
                break;
            }
            if !has_next_button(&html) {
                tracing::info!(tab = %tab, page = current, "No next-page link, ending tab");
                break;
            }
            if let Err(e) = self.page.advance_page().await {
                tracing::warn!(tab = %tab, page = current, error = %e, "Could not advance, ending tab");
                break;
            }
            current += 1;

            match self.page.visible_list_html().await? {
                Some(next) => html = next,
                None => {
                    tracing::warn!(tab = %tab, page = current, "Product list disappeared, ending tab");
                    break;
                }
            }
        }
        Ok(())
    }

    /// Keep products whose name has not been seen in this run.
    fn add_unique(&mut self, products: Vec<ProductRow>) {
        for product in products {
            if self.seen_names.insert(product.name.clone()) {
                self.report.products.push(product);
            } else {
                tracing::debug!(name = %product.name, "Duplicate product dropped");
                self.report.duplicates += 1;
            }
        }
    }

    async fn settle(&self) {
        if !self.options.settle.is_zero() {
            tokio::time::sleep(self.options.settle).await;
        }
    }
}
