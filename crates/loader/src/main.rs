//! `gs25-loader` -- upserts an exported product CSV into PostgreSQL.
//!
//! Usage: `gs25-loader <file.csv>` (or set `CSV_PATH`). Requires
//! `DATABASE_URL`.

use std::process::ExitCode;

use gs25_db::repositories::{EventProductRepo, EventTypeRepo};
use gs25_loader::error::LoadResult;
use gs25_loader::{load, reader};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gs25_loader=info,gs25_db=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Load failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> LoadResult<()> {
    let path = reader::resolve_input(std::env::args().nth(1), std::env::var("CSV_PATH").ok())?;
    let input = reader::read_rows(&path)?;
    tracing::info!(path = %path.display(), rows = input.rows.len(), "Loaded CSV");

    let database_url = std::env::var("DATABASE_URL").map_err(|_| {
        gs25_core::error::CoreError::Validation("DATABASE_URL must be set".into())
    })?;

    // --- Database ---
    let pool = gs25_db::create_pool(&database_url).await?;
    gs25_db::health_check(&pool).await?;
    tracing::info!("Database health check passed");

    gs25_db::run_migrations(&pool).await?;
    tracing::info!("Database migrations applied");

    EventTypeRepo::seed_defaults(&pool).await?;

    // --- Load ---
    let report = load::load_rows(&pool, &input.rows).await?;

    // --- Stats ---
    let total = EventProductRepo::count(&pool).await?;
    tracing::info!(
        total,
        written = report.written(),
        failed = report.failed,
        unreadable = input.skipped,
        "Store updated",
    );
    for count in EventTypeRepo::product_counts(&pool).await? {
        tracing::info!(
            event_type = %count.event_name,
            code = %count.event_id,
            products = count.product_count,
            "Products per event type",
        );
    }

    pool.close().await;
    Ok(())
}
