//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod event_product_repo;
pub mod event_type_repo;

pub use event_product_repo::EventProductRepo;
pub use event_type_repo::EventTypeRepo;
