//! Product extraction from a snapshot of the visible product list.
//!
//! The browser hands over the outer HTML of the `div.tblwrap` currently
//! displayed; everything here is a pure function over that markup.

use std::sync::LazyLock;

use gs25_core::price::strip_won;
use gs25_core::product::ProductRow;
use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Flag label stored for products in the gift tab.
pub const GIFT_PROMOTION: &str = "덤증정";

fn selector(css: &str) -> Selector {
    Selector::parse(css).unwrap_or_else(|e| panic!("invalid selector '{css}': {e:?}"))
}

static PRODUCT_BOX: LazyLock<Selector> = LazyLock::new(|| selector("ul.prod_list li div.prod_box"));
static LIST_ITEM: LazyLock<Selector> = LazyLock::new(|| selector("ul.prod_list li"));
static IMAGE: LazyLock<Selector> = LazyLock::new(|| selector("p.img img"));
static NAME: LazyLock<Selector> = LazyLock::new(|| selector("p.tit"));
static PRICE: LazyLock<Selector> = LazyLock::new(|| selector("p.price span.cost"));
static FLAG_ONE_TO_ONE: LazyLock<Selector> =
    LazyLock::new(|| selector("div.flag_box.ONE_TO_ONE p.flg01 span"));
static FLAG_TWO_TO_ONE: LazyLock<Selector> =
    LazyLock::new(|| selector("div.flag_box.TWO_TO_ONE p.flg01 span"));
static FLAG_GIFT: LazyLock<Selector> = LazyLock::new(|| selector("div.flag_box.GIFT p.flg01 span"));
static FLAG_ANY: LazyLock<Selector> = LazyLock::new(|| selector("div.flag_box p.flg01 span"));
static GIFT_NAME: LazyLock<Selector> = LazyLock::new(|| selector("div.dum_box div.dum_txt p.name"));
static LAST_PAGE: LazyLock<Selector> = LazyLock::new(|| selector("a.next2"));
static NEXT_PAGE: LazyLock<Selector> = LazyLock::new(|| selector("a.next"));

static MOVE_PAGE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"movePage\((\d+)\)").expect("static regex"));

/// Products found on one page plus the number of cards that were skipped
/// for missing required fields.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct PageExtract {
    pub products: Vec<ProductRow>,
    pub skipped: usize,
}

/// Extract every product card in `html`, labelling each with `category`.
///
/// Cards without an image, name, or price are skipped and counted.
pub fn extract_products(html: &str, category: &str) -> PageExtract {
    let fragment = Html::parse_fragment(html);
    let mut page = PageExtract::default();

    for item in fragment.select(&PRODUCT_BOX) {
        match extract_card(item, category) {
            Ok(product) => {
                tracing::debug!(
                    name = %product.name,
                    price = %product.price,
                    promotion = %product.promotion,
                    "Extracted product",
                );
                page.products.push(product);
            }
            Err(missing) => {
                tracing::warn!(missing, "Skipping product card");
                page.skipped += 1;
            }
        }
    }

    page
}

/// Parse one `div.prod_box`. `Err` names the missing field.
fn extract_card(item: ElementRef<'_>, category: &str) -> Result<ProductRow, &'static str> {
    let image = item.select(&IMAGE).next().ok_or("image")?;
    let image_url = image.value().attr("src").unwrap_or_default().trim().to_string();

    let name = item.select(&NAME).next().map(text_of).ok_or("name")?;
    let price = item
        .select(&PRICE)
        .next()
        .map(|cost| strip_won(&text_of(cost)))
        .ok_or("price")?;

    let promotion = promotion_label(item);

    let gift_name = if promotion.contains('덤') {
        item.select(&GIFT_NAME)
            .next()
            .map(text_of)
            .filter(|g| !g.is_empty())
    } else {
        None
    };

    Ok(ProductRow {
        image_url,
        name,
        price,
        promotion,
        category: category.to_string(),
        gift_name,
    })
}

/// Flag label on a card, first match wins:
/// 1+1 flag text, 2+1 flag text, any gift flag, any flag text.
fn promotion_label(item: ElementRef<'_>) -> String {
    first_text(item, &FLAG_ONE_TO_ONE)
        .or_else(|| first_text(item, &FLAG_TWO_TO_ONE))
        .or_else(|| {
            item.select(&FLAG_GIFT)
                .next()
                .map(|_| GIFT_PROMOTION.to_string())
        })
        .or_else(|| first_text(item, &FLAG_ANY))
        .unwrap_or_default()
}

fn first_text(item: ElementRef<'_>, sel: &Selector) -> Option<String> {
    item.select(sel).next().map(text_of).filter(|t| !t.is_empty())
}

/// Rendered text with runs of whitespace collapsed.
fn text_of(element: ElementRef<'_>) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Page count advertised by the last-page link (`onclick="…movePage(N)"`).
pub fn extract_last_page(html: &str) -> Option<u32> {
    let fragment = Html::parse_fragment(html);
    let onclick = fragment.select(&LAST_PAGE).next()?.value().attr("onclick")?;
    MOVE_PAGE_RE
        .captures(onclick)
        .and_then(|caps| caps.get(1))
        .and_then(|n| n.as_str().parse().ok())
}

/// Whether the pager shows a next-page link.
pub fn has_next_button(html: &str) -> bool {
    Html::parse_fragment(html).select(&NEXT_PAGE).next().is_some()
}

/// Whether the list contains at least one item (used to detect page loads).
pub fn has_product_items(html: &str) -> bool {
    Html::parse_fragment(html).select(&LIST_ITEM).next().is_some()
}
