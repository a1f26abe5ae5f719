//! Platform storage adapters.
//!
//! The in-memory backend lives in `viajando-core`; the durable backend is
//! here because it pulls in the database driver.

#[cfg(feature = "sqlite-store")]
mod sqlite;

#[cfg(feature = "sqlite-store")]
pub use sqlite::SqliteTripStore;
