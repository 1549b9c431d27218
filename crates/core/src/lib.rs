//! Shared domain types for the GS25 promotion pipeline.
//!
//! Zero internal dependencies so the scraper, loader and web crates can all
//! depend on it.

pub mod error;
pub mod listing;
pub mod price;
pub mod product;
pub mod promotion;
pub mod types;
