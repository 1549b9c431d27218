//! Browser-driven scraper for the GS25 event-goods page.
//!
//! Exposes the building blocks (config, browser seam, HTML extraction,
//! crawl loop, CSV export) so integration tests and the binary entrypoint
//! can both access them.

pub mod browser;
pub mod config;
pub mod crawler;
pub mod error;
pub mod export;
pub mod extract;
