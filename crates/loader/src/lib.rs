//! Loads an exported product CSV into the database.
//!
//! [`reader::read_rows`] parses the file, [`load::load_rows`] upserts the
//! rows and reports how many were inserted, updated, or rejected.

pub mod error;
pub mod load;
pub mod reader;
