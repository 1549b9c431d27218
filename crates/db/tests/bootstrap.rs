use gs25_db::repositories::EventTypeRepo;
use sqlx::PgPool;

/// Connect, migrate, verify both tables exist and seeding is idempotent.
#[sqlx::test(migrations = "./migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    gs25_db::health_check(&pool).await.unwrap();

    for table in ["event_types", "event_products"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }

    assert_eq!(EventTypeRepo::seed_defaults(&pool).await.unwrap(), 3);
    assert_eq!(EventTypeRepo::seed_defaults(&pool).await.unwrap(), 0);

    let types = EventTypeRepo::list(&pool).await.unwrap();
    let codes: Vec<&str> = types.iter().map(|t| t.event_id.as_str()).collect();
    assert_eq!(codes, ["ONE_TO_ONE", "TWO_TO_ONE", "GIFT"]);
    assert_eq!(types[2].event_name, "덤증정 행사");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_by_code(pool: PgPool) {
    EventTypeRepo::seed_defaults(&pool).await.unwrap();

    let gift = EventTypeRepo::find_by_code(&pool, "GIFT").await.unwrap();
    assert_eq!(gift.map(|t| t.event_name), Some("덤증정 행사".to_string()));

    let missing = EventTypeRepo::find_by_code(&pool, "TOTAL").await.unwrap();
    assert!(missing.is_none());
}
