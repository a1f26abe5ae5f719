//! Viajando Core Library
//!
//! Provides the persistence layer of the Viajando trip planner, including:
//! - The trip record model (`Trip`)
//! - The storage capability (`TripStore`) and its in-memory implementation
//! - The persistence service (`TripService`) that callers talk to
//!
//! This library is designed to be platform-independent, abstracting the storage layer through traits.
//! The durable `SQLite` backend lives in `viajando-app`.

pub mod error;
pub mod services;
pub mod traits;
pub mod types;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export common types
pub use error::{CoreError, CoreResult};
pub use services::TripService;
pub use traits::{InMemoryTripStore, TripStore};
pub use types::{Platform, Trip, TripDraft, WriteOutcome};
