/// Domain errors shared by the scraper, loader and web tiers.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown event tab '{code}' (expected one of ONE_TO_ONE, TWO_TO_ONE, GIFT)")]
    UnknownEventTab { code: String },

    #[error("Invalid product row: {0}")]
    InvalidProduct(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
