//! Shared helpers

pub mod datetime;

pub use datetime::{format_date, normalize_date, INVALID_DATE};
