//! Promotion category lookup rows.

use gs25_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `event_types` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventType {
    pub id: DbId,
    /// Tab code, e.g. `ONE_TO_ONE`.
    pub event_id: String,
    /// Display name, e.g. `1+1 행사`.
    pub event_name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
}

/// Number of products linked to one event type.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct EventTypeCount {
    pub event_id: String,
    pub event_name: String,
    pub product_count: i64,
}
