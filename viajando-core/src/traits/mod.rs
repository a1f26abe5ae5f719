//! Storage layer abstraction trait definition

mod trip_store;

pub use trip_store::{example_trips, InMemoryTripStore, TripStore, TRIPS_COLLECTION};
