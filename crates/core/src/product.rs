//! The scraped product record and its delimited-file layout.
//!
//! Column headers use the Korean labels the event page itself shows so
//! exported files stay readable in a spreadsheet and load back unchanged.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::promotion::EventTab;

/// Maximum product name length accepted by the `event_products` table.
pub const MAX_NAME_LEN: usize = 255;

/// Maximum image URL length accepted by the `event_products` table.
pub const MAX_IMAGE_URL_LEN: usize = 500;

/// One product as it appears on an event page (and in the exported CSV).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductRow {
    #[serde(rename = "이미지URL")]
    pub image_url: String,
    #[serde(rename = "상품명")]
    pub name: String,
    /// Display text with the currency marker removed, e.g. `"1,700"`.
    #[serde(rename = "가격")]
    pub price: String,
    /// Flag label on the product card: `1+1`, `2+1`, `덤증정`.
    #[serde(rename = "행사유형")]
    pub promotion: String,
    /// Display name of the tab the product was scraped from.
    #[serde(rename = "행사분류")]
    pub category: String,
    #[serde(rename = "덤증정상품", default)]
    pub gift_name: Option<String>,
}

impl ProductRow {
    /// The tab this row belongs to, derived from its category label.
    pub fn event_tab(&self) -> Option<EventTab> {
        EventTab::from_category_label(&self.category)
    }

    /// Gift name with empty strings treated as absent.
    pub fn gift(&self) -> Option<&str> {
        self.gift_name
            .as_deref()
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }

    /// Check the row fits the store's constraints.
    pub fn validate(&self) -> Result<(), CoreError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(CoreError::InvalidProduct("product name is empty".into()));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(CoreError::InvalidProduct(format!(
                "product name exceeds {MAX_NAME_LEN} characters: {name}"
            )));
        }
        if self.image_url.chars().count() > MAX_IMAGE_URL_LEN {
            return Err(CoreError::InvalidProduct(format!(
                "image URL exceeds {MAX_IMAGE_URL_LEN} characters for '{name}'"
            )));
        }
        Ok(())
    }
}
