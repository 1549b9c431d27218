use gs25_core::error::CoreError;

/// Errors raised while driving the browser or writing results.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// A domain-level error from `gs25_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The WebDriver session could not be created.
    #[error("WebDriver session error: {0}")]
    Session(#[from] fantoccini::error::NewSessionError),

    /// A WebDriver command failed (element lookup, script, navigation).
    #[error("WebDriver command error: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    #[error("Timed out waiting for {0}")]
    Timeout(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
