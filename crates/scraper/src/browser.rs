//! Browser seam.
//!
//! [`EventPage`] lists the page operations the crawl loop needs; the
//! production implementation [`WebDriverPage`] drives Chrome over the W3C
//! WebDriver protocol. Tests substitute a scripted page.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder, Locator};
use gs25_core::promotion::EventTab;
use serde_json::json;

use crate::error::{ScrapeError, ScrapeResult};
use crate::extract::has_product_items;

/// Interval between polls while waiting for the next page to render.
const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Script the site's pager runs when "next" is clicked.
const NEXT_PAGE_SCRIPT: &str = "goodsPageController.moveControl(1)";

/// Operations on the event-goods page.
#[async_trait]
pub trait EventPage: Send {
    /// Navigate to `url`.
    async fn open(&mut self, url: &str) -> ScrapeResult<()>;

    /// Wait until the promotion tab strip has rendered.
    async fn wait_ready(&mut self) -> ScrapeResult<()>;

    /// Number of tab links in the tab strip.
    async fn count_tabs(&mut self) -> ScrapeResult<usize>;

    /// Reload the page, returning it to its initial tab.
    async fn refresh(&mut self) -> ScrapeResult<()>;

    /// Activate a promotion tab.
    async fn click_tab(&mut self, tab: EventTab) -> ScrapeResult<()>;

    /// Whether `tab` is currently the active one.
    async fn is_tab_active(&mut self, tab: EventTab) -> ScrapeResult<bool>;

    /// Outer HTML of the product list that is currently displayed, if any.
    async fn visible_list_html(&mut self) -> ScrapeResult<Option<String>>;

    /// Move the visible list to its next page and wait for it to render.
    async fn advance_page(&mut self) -> ScrapeResult<()>;

    /// End the browser session.
    async fn close(&mut self) -> ScrapeResult<()>;
}

/// [`EventPage`] backed by a WebDriver session.
pub struct WebDriverPage {
    client: Client,
    wait_time: Duration,
    settle: Duration,
}

impl WebDriverPage {
    /// Start a Chrome session through the WebDriver server at `webdriver_url`.
    pub async fn connect(
        webdriver_url: &str,
        headless: bool,
        wait_time: Duration,
        settle: Duration,
    ) -> ScrapeResult<Self> {
        let mut args = vec![
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--window-size=1920,1080",
        ];
        if headless {
            args.insert(0, "--headless");
        }

        let mut capabilities = serde_json::Map::new();
        capabilities.insert("goog:chromeOptions".to_string(), json!({ "args": args }));

        let client = ClientBuilder::rustls()?
            .capabilities(capabilities)
            .connect(webdriver_url)
            .await?;

        tracing::info!(webdriver_url, headless, "WebDriver session started");

        Ok(Self {
            client,
            wait_time,
            settle,
        })
    }
}

#[async_trait]
impl EventPage for WebDriverPage {
    async fn open(&mut self, url: &str) -> ScrapeResult<()> {
        self.client.goto(url).await?;
        tracing::info!(url, "Opened event page");
        Ok(())
    }

    async fn wait_ready(&mut self) -> ScrapeResult<()> {
        self.client
            .wait()
            .at_most(self.wait_time)
            .for_element(Locator::Css("ul.myptab"))
            .await?;
        Ok(())
    }

    async fn count_tabs(&mut self) -> ScrapeResult<usize> {
        let tabs = self
            .client
            .find_all(Locator::Css("ul.myptab li span a"))
            .await?;
        Ok(tabs.len())
    }

    async fn refresh(&mut self) -> ScrapeResult<()> {
        self.client.refresh().await?;
        Ok(())
    }

    async fn click_tab(&mut self, tab: EventTab) -> ScrapeResult<()> {
        let css = format!("a#{}", tab.code());
        let anchor = self
            .client
            .wait()
            .at_most(self.wait_time)
            .for_element(Locator::Css(&css))
            .await?;
        // A scripted click works even when the anchor is covered by an overlay.
        self.client
            .execute("arguments[0].click();", vec![serde_json::to_value(&anchor)?])
            .await?;
        Ok(())
    }

    async fn is_tab_active(&mut self, tab: EventTab) -> ScrapeResult<bool> {
        let css = format!("span.active a#{}", tab.code());
        let active = self.client.find_all(Locator::Css(&css)).await?;
        Ok(!active.is_empty())
    }

    async fn visible_list_html(&mut self) -> ScrapeResult<Option<String>> {
        let wraps = self.client.find_all(Locator::Css("div.tblwrap")).await?;
        for wrap in wraps {
            if wrap.css_value("display").await? == "block" {
                return Ok(Some(wrap.html(false).await?));
            }
        }
        Ok(None)
    }

    async fn advance_page(&mut self) -> ScrapeResult<()> {
        self.client.execute(NEXT_PAGE_SCRIPT, Vec::new()).await?;
        tokio::time::sleep(self.settle).await;

        let deadline = Instant::now() + self.wait_time;
        loop {
            if let Some(html) = self.visible_list_html().await? {
                if has_product_items(&html) {
                    return Ok(());
                }
            }
            if Instant::now() >= deadline {
                return Err(ScrapeError::Timeout("next page product list".into()));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        self.client.clone().close().await?;
        tracing::info!("WebDriver session closed");
        Ok(())
    }
}
