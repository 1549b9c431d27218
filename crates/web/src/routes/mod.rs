//! Route tree.
//!
//! ```text
//! /health                      service + database health (JSON)
//! /                            all products, newest first
//! /products/{promotion}        products with one promotion label
//! /category/{category}         products in one event type (name or code)
//! /search?keyword=             product name search
//! /filter?promotion_type=&category=&sort_by=&sort_order=
//! ```

pub mod health;
pub mod products;
