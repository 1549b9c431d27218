//! Crawl-loop tests against a scripted in-memory page.
//!
//! The scripted page serves canned list HTML per tab and page, so these
//! tests exercise pagination, de-duplication and failure containment
//! without a browser.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gs25_core::promotion::EventTab;
use gs25_scraper::browser::EventPage;
use gs25_scraper::crawler::{CrawlOptions, Crawler};
use gs25_scraper::error::{ScrapeError, ScrapeResult};

// ---------------------------------------------------------------------------
// Scripted page
// ---------------------------------------------------------------------------

#[derive(Default)]
struct Script {
    tabs: usize,
    pages: HashMap<EventTab, Vec<String>>,
    failing_clicks: Vec<EventTab>,
    /// Tabs that only become active on the second click.
    sticky_tabs: Vec<EventTab>,
    /// (tab, page index) after which advancing fails.
    failing_advance: Option<(EventTab, usize)>,
}

#[derive(Default)]
struct Calls {
    clicks: Vec<EventTab>,
    advances: usize,
    closed: bool,
}

struct ScriptedPage {
    script: Script,
    calls: Arc<Mutex<Calls>>,
    active: Option<EventTab>,
    clicks_on_active: usize,
    page: usize,
}

impl ScriptedPage {
    fn new(script: Script) -> (Self, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let page = Self {
            script,
            calls: Arc::clone(&calls),
            active: None,
            clicks_on_active: 0,
            page: 0,
        };
        (page, calls)
    }
}

#[async_trait]
impl EventPage for ScriptedPage {
    async fn open(&mut self, _url: &str) -> ScrapeResult<()> {
        Ok(())
    }

    async fn wait_ready(&mut self) -> ScrapeResult<()> {
        Ok(())
    }

    async fn count_tabs(&mut self) -> ScrapeResult<usize> {
        Ok(self.script.tabs)
    }

    async fn refresh(&mut self) -> ScrapeResult<()> {
        self.active = None;
        self.clicks_on_active = 0;
        self.page = 0;
        Ok(())
    }

    async fn click_tab(&mut self, tab: EventTab) -> ScrapeResult<()> {
        self.calls.lock().unwrap().clicks.push(tab);
        if self.script.failing_clicks.contains(&tab) {
            return Err(ScrapeError::Timeout(format!("a#{}", tab.code())));
        }
        self.clicks_on_active += 1;
        if !self.script.sticky_tabs.contains(&tab) || self.clicks_on_active > 1 {
            self.active = Some(tab);
        }
        Ok(())
    }

    async fn is_tab_active(&mut self, tab: EventTab) -> ScrapeResult<bool> {
        Ok(self.active == Some(tab))
    }

    async fn visible_list_html(&mut self) -> ScrapeResult<Option<String>> {
        Ok(self
            .active
            .and_then(|tab| self.script.pages.get(&tab))
            .and_then(|pages| pages.get(self.page))
            .cloned())
    }

    async fn advance_page(&mut self) -> ScrapeResult<()> {
        self.calls.lock().unwrap().advances += 1;
        if let (Some(tab), Some((fail_tab, fail_page))) = (self.active, self.script.failing_advance) {
            if tab == fail_tab && self.page == fail_page {
                return Err(ScrapeError::Timeout("next page product list".into()));
            }
        }
        self.page += 1;
        Ok(())
    }

    async fn close(&mut self) -> ScrapeResult<()> {
        self.calls.lock().unwrap().closed = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn card(name: &str, price: &str, flag_class: &str, flag: &str) -> String {
    format!(
        r#"<li><div class="prod_box">
            <p class="img"><img src="https://image.example/{name}.jpg"></p>
            <p class="tit">{name}</p>
            <p class="price"><span class="cost">{price}원</span></p>
            <div class="flag_box {flag_class}"><p class="flg01"><span>{flag}</span></p></div>
        </div></li>"#
    )
}

fn list_page(cards: &[String], last_page: Option<u32>, has_next: bool) -> String {
    let next = if has_next {
        r#"<a class="next" onclick="goodsPageController.moveControl(1)"></a>"#
    } else {
        ""
    };
    let last = last_page
        .map(|n| format!(r#"<a class="next2" onclick="goodsPageController.movePage({n})"></a>"#))
        .unwrap_or_default();
    format!(
        r#"<div class="tblwrap"><ul class="prod_list">{}</ul><div class="paging">{next}{last}</div></div>"#,
        cards.concat()
    )
}

fn options(crawl_all_pages: bool, max_pages: u32) -> CrawlOptions {
    CrawlOptions {
        url: "http://shop.example/event-goods".into(),
        crawl_all_pages,
        max_pages,
        settle: Duration::ZERO,
    }
}

fn full_script() -> Script {
    let mut pages = HashMap::new();
    pages.insert(
        EventTab::OneToOne,
        vec![
            list_page(
                &[card("삼각김밥", "1,300", "ONE_TO_ONE", "1+1"), card("콜라", "2,000", "ONE_TO_ONE", "1+1")],
                Some(2),
                true,
            ),
            list_page(&[card("생수", "900", "ONE_TO_ONE", "1+1")], Some(2), true),
        ],
    );
    pages.insert(
        EventTab::TwoToOne,
        vec![list_page(
            &[card("바나나우유", "1,700", "TWO_TO_ONE", "2+1"), card("콜라", "2,000", "TWO_TO_ONE", "2+1")],
            Some(1),
            false,
        )],
    );
    pages.insert(
        EventTab::Gift,
        vec![list_page(&[card("컵라면", "1,200", "GIFT", "")], None, false)],
    );
    Script {
        tabs: 4,
        pages,
        ..Script::default()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn crawls_all_tabs_and_pages_in_order() {
    let (page, calls) = ScriptedPage::new(full_script());
    let report = Crawler::new(page, options(true, 50)).run_all().await;

    let names: Vec<&str> = report.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["삼각김밥", "콜라", "생수", "바나나우유", "컵라면"]);
    assert_eq!(report.duplicates, 1, "second 콜라 is dropped");
    assert_eq!(report.skipped, 0);
    assert!(report.failed_tabs.is_empty());

    assert_eq!(report.products[3].category, "2+1 행사");
    assert_eq!(report.products[4].promotion, "덤증정");

    let calls = calls.lock().unwrap();
    assert_eq!(calls.advances, 1);
    assert!(calls.closed);
}

#[tokio::test]
async fn per_category_counts_follow_first_seen_order() {
    let (page, _) = ScriptedPage::new(full_script());
    let report = Crawler::new(page, options(true, 50)).run_all().await;

    assert_eq!(
        report.per_category(),
        vec![
            ("1+1 행사".to_string(), 3),
            ("2+1 행사".to_string(), 1),
            ("덤증정 행사".to_string(), 1),
        ]
    );
}

#[tokio::test]
async fn page_cap_applies_when_not_crawling_all_pages() {
    let (page, calls) = ScriptedPage::new(full_script());
    let report = Crawler::new(page, options(false, 1))
        .run_single(EventTab::OneToOne)
        .await;

    assert_eq!(report.products.len(), 2);
    assert_eq!(calls.lock().unwrap().advances, 0);
}

#[tokio::test]
async fn failing_tab_does_not_stop_the_run() {
    let mut script = full_script();
    script.failing_clicks.push(EventTab::TwoToOne);
    let (page, calls) = ScriptedPage::new(script);

    let report = Crawler::new(page, options(true, 50)).run_all().await;

    assert_eq!(report.failed_tabs, vec![EventTab::TwoToOne]);
    let names: Vec<&str> = report.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["삼각김밥", "콜라", "생수", "컵라면"]);
    assert!(calls.lock().unwrap().closed);
}

#[tokio::test]
async fn failed_page_move_ends_only_that_tab() {
    let mut script = full_script();
    script.failing_advance = Some((EventTab::OneToOne, 0));
    let (page, _) = ScriptedPage::new(script);

    let report = Crawler::new(page, options(true, 50)).run_all().await;

    let names: Vec<&str> = report.products.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["삼각김밥", "콜라", "바나나우유", "컵라면"]);
    assert!(report.failed_tabs.is_empty());
}

#[tokio::test]
async fn inactive_tab_is_clicked_twice() {
    let mut script = full_script();
    script.sticky_tabs.push(EventTab::Gift);
    let (page, calls) = ScriptedPage::new(script);

    let report = Crawler::new(page, options(true, 50))
        .run_single(EventTab::Gift)
        .await;

    assert_eq!(report.products.len(), 1);
    assert_eq!(calls.lock().unwrap().clicks, vec![EventTab::Gift, EventTab::Gift]);
}

#[tokio::test]
async fn no_tabs_means_no_products() {
    let mut script = full_script();
    script.tabs = 0;
    let (page, calls) = ScriptedPage::new(script);

    let report = Crawler::new(page, options(true, 50)).run_all().await;

    assert!(report.products.is_empty());
    let calls = calls.lock().unwrap();
    assert!(calls.clicks.is_empty());
    assert!(calls.closed);
}

#[tokio::test]
async fn empty_first_page_ends_tab() {
    let mut script = full_script();
    script
        .pages
        .insert(EventTab::OneToOne, vec![list_page(&[], Some(3), true)]);
    let (page, calls) = ScriptedPage::new(script);

    let report = Crawler::new(page, options(true, 50))
        .run_single(EventTab::OneToOne)
        .await;

    assert!(report.products.is_empty());
    assert_eq!(calls.lock().unwrap().advances, 0);
}
