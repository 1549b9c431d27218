//! Repository for the `event_types` lookup table.

use std::collections::HashMap;

use gs25_core::promotion::EventTab;
use gs25_core::types::DbId;
use sqlx::PgPool;

use crate::models::event_type::{EventType, EventTypeCount};

/// Column list for event_types queries.
const COLUMNS: &str = "id, event_id, event_name, description, created_at";

/// Provides lookup and seeding for promotion categories.
pub struct EventTypeRepo;

impl EventTypeRepo {
    /// Insert every [`EventTab`] that is not already present.
    ///
    /// Returns the number of rows inserted (0 on an already-seeded store).
    pub async fn seed_defaults(pool: &PgPool) -> Result<u64, sqlx::Error> {
        let mut inserted = 0;
        for tab in EventTab::ALL {
            let result = sqlx::query(
                "INSERT INTO event_types (event_id, event_name, description) \
                 VALUES ($1, $2, $3) \
                 ON CONFLICT (event_id) DO NOTHING",
            )
            .bind(tab.code())
            .bind(tab.display_name())
            .bind(tab.description())
            .execute(pool)
            .await?;
            inserted += result.rows_affected();
        }
        if inserted > 0 {
            tracing::info!(inserted, "Seeded event types");
        } else {
            tracing::debug!("Event types already seeded");
        }
        Ok(inserted)
    }

    /// List all event types in id order.
    pub async fn list(pool: &PgPool) -> Result<Vec<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types ORDER BY id ASC");
        sqlx::query_as::<_, EventType>(&query).fetch_all(pool).await
    }

    /// Find an event type by its tab code.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<EventType>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM event_types WHERE event_id = $1");
        sqlx::query_as::<_, EventType>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// Map of tab code to row id, used to resolve product foreign keys.
    pub async fn id_map(pool: &PgPool) -> Result<HashMap<String, DbId>, sqlx::Error> {
        let rows: Vec<(DbId, String)> = sqlx::query_as("SELECT id, event_id FROM event_types")
            .fetch_all(pool)
            .await?;
        Ok(rows.into_iter().map(|(id, code)| (code, id)).collect())
    }

    /// Product count per event type, including types with no products.
    pub async fn product_counts(pool: &PgPool) -> Result<Vec<EventTypeCount>, sqlx::Error> {
        sqlx::query_as::<_, EventTypeCount>(
            "SELECT et.event_id, et.event_name, COUNT(ep.id) AS product_count \
             FROM event_types et \
             LEFT JOIN event_products ep ON ep.event_type_id = et.id \
             GROUP BY et.id, et.event_id, et.event_name \
             ORDER BY et.id ASC",
        )
        .fetch_all(pool)
        .await
    }
}
