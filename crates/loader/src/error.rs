use std::path::PathBuf;

use gs25_core::error::CoreError;

/// Errors that stop a load run.
///
/// Problems with a single row are not errors at this level; they are
/// logged and counted in the load report.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("CSV file not found: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("No CSV path given (pass it as the first argument or set CSV_PATH)")]
    NoInput,

    #[error("Could not parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

pub type LoadResult<T> = Result<T, LoadError>;
