//! GS25 promotion browser.
//!
//! Server-rendered HTML pages over the `event_products` store. Exposes
//! config, state, error handling, and the router so the binary and the
//! integration tests build the same application.

pub mod config;
pub mod error;
pub mod handlers;
pub mod pages;
pub mod router;
pub mod routes;
pub mod state;
