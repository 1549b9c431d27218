//! Upsert of parsed rows into the store.

use std::collections::HashMap;

use gs25_core::error::CoreError;
use gs25_core::price::try_parse_price;
use gs25_core::product::ProductRow;
use gs25_core::types::DbId;
use gs25_db::models::event_product::UpsertProduct;
use gs25_db::repositories::{EventProductRepo, EventTypeRepo};
use gs25_db::DbPool;

use crate::error::LoadResult;

/// Per-row outcome counts for one load run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    pub inserted: usize,
    pub updated: usize,
    pub failed: usize,
}

impl LoadReport {
    /// Rows written, new or updated.
    pub fn written(&self) -> usize {
        self.inserted + self.updated
    }
}

/// Upsert every row, continuing past rows that fail.
///
/// Rows are keyed by (name, promotion label). A category that matches no
/// known tab is stored without an event type.
pub async fn load_rows(pool: &DbPool, rows: &[ProductRow]) -> LoadResult<LoadReport> {
    let type_ids = EventTypeRepo::id_map(pool).await?;
    let mut report = LoadReport::default();

    for row in rows {
        let input = match to_upsert(row, &type_ids) {
            Ok(input) => input,
            Err(e) => {
                tracing::warn!(name = %row.name, error = %e, "Rejected row");
                report.failed += 1;
                continue;
            }
        };

        match EventProductRepo::upsert(pool, &input).await {
            Ok(outcome) if outcome.inserted => report.inserted += 1,
            Ok(_) => report.updated += 1,
            Err(e) => {
                tracing::error!(name = %input.product_name, error = %e, "Failed to upsert product");
                report.failed += 1;
            }
        }
    }

    tracing::info!(
        inserted = report.inserted,
        updated = report.updated,
        failed = report.failed,
        "Load finished",
    );
    Ok(report)
}

/// Build the upsert input for a row, resolving its event type id by tab code.
fn to_upsert(row: &ProductRow, type_ids: &HashMap<String, DbId>) -> Result<UpsertProduct, CoreError> {
    row.validate()?;

    let event_type_id = match row.event_tab() {
        Some(tab) => type_ids.get(tab.code()).copied(),
        None => {
            tracing::debug!(name = %row.name, category = %row.category, "Unrecognised category");
            None
        }
    };

    let image_url = Some(row.image_url.trim())
        .filter(|u| !u.is_empty())
        .map(String::from);

    Ok(UpsertProduct {
        product_name: row.name.trim().to_string(),
        price: row_price(row),
        image_url,
        promotion_type: row.promotion.trim().to_string(),
        event_type_id,
        gift_product: row.gift().map(String::from),
    })
}

/// Whole-won price, 0 when the text has no digits or does not fit.
fn row_price(row: &ProductRow) -> i32 {
    try_parse_price(&row.price).unwrap_or_else(|| {
        tracing::debug!(name = %row.name, price = %row.price, "Unparseable price, storing 0");
        0
    })
}
