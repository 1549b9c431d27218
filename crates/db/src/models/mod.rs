pub mod event_product;
pub mod event_type;
