//! HTML page models.
//!
//! Handlers build a [`ProductsPage`] from query results; the template in
//! `templates/products.html` renders it with HTML auto-escaping.

use askama::Template;
use gs25_core::listing::{ProductFilter, SortField, SortOrder};
use gs25_db::models::event_product::ProductListing;
use gs25_db::models::event_type::EventType;

/// The product listing page.
#[derive(Template)]
#[template(path = "products.html")]
pub struct ProductsPage {
    pub heading: Option<Heading>,
    /// Current search keyword, echoed into the search box.
    pub keyword: String,
    pub products: Vec<ProductCard>,
    pub promotion_links: Vec<NavLink>,
    pub category_links: Vec<NavLink>,
    pub promotion_options: Vec<SelectOption>,
    pub category_options: Vec<SelectOption>,
    pub sort_options: Vec<SelectOption>,
    pub order_options: Vec<SelectOption>,
}

/// Sub-heading describing what the listing is restricted to.
pub struct Heading {
    pub subject: String,
    pub suffix: &'static str,
}

pub struct ProductCard {
    pub name: String,
    pub price: String,
    pub image_url: Option<String>,
    pub category: String,
    pub promotion: String,
    pub gift: Option<String>,
}

pub struct NavLink {
    pub href: String,
    pub label: String,
}

pub struct SelectOption {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl ProductsPage {
    pub fn new(
        filter: &ProductFilter,
        products: Vec<ProductListing>,
        promotions: Vec<String>,
        event_types: Vec<EventType>,
    ) -> Self {
        let current_promotion = filter.promotion.as_deref();
        let current_category = filter.category.as_deref();

        let promotion_links = promotions
            .iter()
            .map(|p| NavLink {
                href: format!("/products/{}", urlencoding::encode(p)),
                label: p.clone(),
            })
            .collect();
        let category_links = event_types
            .iter()
            .map(|t| NavLink {
                href: format!("/category/{}", urlencoding::encode(&t.event_id)),
                label: t.event_name.clone(),
            })
            .collect();

        let heading = heading(filter, &event_types);

        let promotion_options = promotions
            .into_iter()
            .map(|p| SelectOption {
                selected: current_promotion == Some(p.as_str()),
                label: p.clone(),
                value: p,
            })
            .collect();
        let category_options = event_types
            .into_iter()
            .map(|t| SelectOption {
                selected: current_category == Some(t.event_id.as_str())
                    || current_category == Some(t.event_name.as_str()),
                value: t.event_id,
                label: t.event_name,
            })
            .collect();

        Self {
            heading,
            keyword: filter.keyword.clone().unwrap_or_default(),
            products: products.into_iter().map(ProductCard::from).collect(),
            promotion_links,
            category_links,
            promotion_options,
            category_options,
            sort_options: sort_options(filter.sort),
            order_options: order_options(filter.order),
        }
    }
}

impl From<ProductListing> for ProductCard {
    fn from(p: ProductListing) -> Self {
        Self {
            name: p.product_name,
            price: format_won(p.price),
            image_url: p.image_url.filter(|u| !u.is_empty()),
            category: p.event_category.unwrap_or_default(),
            promotion: p.promotion_type,
            gift: p.gift_product.filter(|g| !g.is_empty()),
        }
    }
}

/// Promotion wins over category, category over keyword. A category given
/// by code is shown by its display name.
fn heading(filter: &ProductFilter, event_types: &[EventType]) -> Option<Heading> {
    if let Some(p) = &filter.promotion {
        Some(Heading { subject: p.clone(), suffix: "행사 상품" })
    } else if let Some(c) = &filter.category {
        let subject = event_types
            .iter()
            .find(|t| t.event_id == *c)
            .map_or_else(|| c.clone(), |t| t.event_name.clone());
        Some(Heading { subject, suffix: "카테고리 상품" })
    } else {
        filter.keyword.as_ref().map(|k| Heading {
            subject: k.clone(),
            suffix: "검색 결과",
        })
    }
}

fn sort_options(current: SortField) -> Vec<SelectOption> {
    [
        (SortField::Id, "최신순"),
        (SortField::ProductName, "상품명"),
        (SortField::Price, "가격"),
    ]
    .into_iter()
    .map(|(field, label)| SelectOption {
        value: field.as_str().to_string(),
        label: label.to_string(),
        selected: field == current,
    })
    .collect()
}

fn order_options(current: SortOrder) -> Vec<SelectOption> {
    [(SortOrder::Desc, "내림차순"), (SortOrder::Asc, "오름차순")]
        .into_iter()
        .map(|(order, label)| SelectOption {
            value: order.as_sql().to_string(),
            label: label.to_string(),
            selected: order == current,
        })
        .collect()
}

/// `1700` -> `1,700원`.
pub fn format_won(price: i32) -> String {
    let digits = price.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + 4);
    if price < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push('원');
    out
}
