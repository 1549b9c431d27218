//! Product rows and the DTOs used to write and list them.

use gs25_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A product joined with its event type, as shown on listing pages.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProductListing {
    pub id: DbId,
    pub product_name: String,
    pub price: i32,
    pub image_url: Option<String>,
    pub promotion_type: String,
    pub gift_product: Option<String>,
    /// `event_types.event_id`, `None` when the category was not recognised.
    pub event_code: Option<String>,
    /// `event_types.event_name`.
    pub event_category: Option<String>,
    pub crawled_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Input for [`EventProductRepo::upsert`](crate::repositories::EventProductRepo::upsert).
#[derive(Debug, Clone)]
pub struct UpsertProduct {
    pub product_name: String,
    pub price: i32,
    pub image_url: Option<String>,
    pub promotion_type: String,
    pub event_type_id: Option<DbId>,
    pub gift_product: Option<String>,
}

/// Result of an upsert: the row id and whether it was newly created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow)]
pub struct UpsertOutcome {
    pub id: DbId,
    pub inserted: bool,
}
