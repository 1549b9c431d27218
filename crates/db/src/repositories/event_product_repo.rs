//! Repository for the `event_products` table.

use gs25_core::listing::{ProductFilter, SortField};
use sqlx::PgPool;

use crate::models::event_product::{ProductListing, UpsertOutcome, UpsertProduct};

/// Select list for listing queries (`p` = event_products, `et` = event_types).
const LISTING_COLUMNS: &str = "\
    p.id, p.product_name, p.price, p.image_url, p.promotion_type, p.gift_product, \
    et.event_id AS event_code, et.event_name AS event_category, \
    p.crawled_at, p.updated_at";

/// Provides upsert and filtered listing for products.
pub struct EventProductRepo;

impl EventProductRepo {
    /// Insert a product, or update price/image/category/gift when a row with
    /// the same (product_name, promotion_type) already exists.
    pub async fn upsert(pool: &PgPool, input: &UpsertProduct) -> Result<UpsertOutcome, sqlx::Error> {
        sqlx::query_as::<_, UpsertOutcome>(
            "INSERT INTO event_products \
                (product_name, price, image_url, promotion_type, event_type_id, gift_product) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             ON CONFLICT ON CONSTRAINT uq_event_products_name_promotion DO UPDATE SET \
                price = EXCLUDED.price, \
                image_url = EXCLUDED.image_url, \
                event_type_id = EXCLUDED.event_type_id, \
                gift_product = EXCLUDED.gift_product \
             RETURNING id, (xmax = 0) AS inserted",
        )
        .bind(&input.product_name)
        .bind(input.price)
        .bind(&input.image_url)
        .bind(&input.promotion_type)
        .bind(input.event_type_id)
        .bind(&input.gift_product)
        .fetch_one(pool)
        .await
    }

    /// List products matching `filter`.
    ///
    /// Filters are bound parameters; only the whitelisted sort column and
    /// direction are interpolated.
    pub async fn list(
        pool: &PgPool,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductListing>, sqlx::Error> {
        let query = format!(
            "SELECT {LISTING_COLUMNS} \
             FROM event_products p \
             LEFT JOIN event_types et ON et.id = p.event_type_id \
             WHERE ($1::TEXT IS NULL OR p.promotion_type = $1) \
               AND ($2::TEXT IS NULL OR et.event_name = $2 OR et.event_id = $2) \
               AND ($3::TEXT IS NULL OR p.product_name ILIKE $3) \
             {}",
            order_clause(filter)
        );
        sqlx::query_as::<_, ProductListing>(&query)
            .bind(&filter.promotion)
            .bind(&filter.category)
            .bind(filter.keyword_pattern())
            .fetch_all(pool)
            .await
    }

    /// Distinct promotion labels present in the store, alphabetically.
    pub async fn promotion_types(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar::<_, String>(
            "SELECT DISTINCT promotion_type FROM event_products \
             WHERE promotion_type <> '' \
             ORDER BY promotion_type ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Total number of stored products.
    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM event_products")
            .fetch_one(pool)
            .await
    }
}

/// `ORDER BY` for a filter; non-id sorts fall back to newest first on ties.
fn order_clause(filter: &ProductFilter) -> String {
    let direction = filter.order.as_sql();
    match filter.sort {
        SortField::Id => format!("ORDER BY p.id {direction}"),
        other => format!("ORDER BY {} {direction}, p.id DESC", other.column()),
    }
}
