//! Trip storage abstract Trait

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CoreResult;
use crate::types::{Trip, TripDraft, WriteOutcome};
use crate::utils::normalize_date;

/// Collection key under which the in-memory backend keeps its records.
pub const TRIPS_COLLECTION: &str = "trips";

/// Trip storage Trait
///
/// Platform implementations:
/// - Native: `SqliteTripStore` (`SeaORM`, durable)
/// - Web: `InMemoryTripStore` (process-local, lost on restart)
///
/// Update and delete of a missing id must return `WriteOutcome::NoOp`
/// on every implementation, never an error.
#[async_trait]
pub trait TripStore: Send + Sync {
    /// Short backend identifier used in logs
    fn backend_name(&self) -> &'static str;

    /// Prepare the backend (schema bootstrap, seeding).
    ///
    /// Must be safe to call more than once.
    async fn initialize(&self) -> CoreResult<()>;

    /// Get a snapshot of all trips, in storage order
    async fn find_all(&self) -> CoreResult<Vec<Trip>>;

    /// Insert a trip and return it with its backend-assigned id
    async fn insert(&self, draft: &TripDraft) -> CoreResult<Trip>;

    /// Replace the fields of the trip with `id`
    async fn update(&self, id: i64, draft: &TripDraft) -> CoreResult<WriteOutcome>;

    /// Delete the trip with `id`
    async fn delete(&self, id: i64) -> CoreResult<WriteOutcome>;
}

type IdSource = Arc<dyn Fn() -> i64 + Send + Sync>;

/// In-memory trip store
///
/// Used where no durable store is available. Ids come from the wall clock
/// in milliseconds, so two inserts within the same millisecond receive the
/// same id; that is a known limitation of this backend.
#[derive(Clone)]
pub struct InMemoryTripStore {
    collections: Arc<RwLock<HashMap<String, Vec<Trip>>>>,
    seed: Vec<Trip>,
    next_id: IdSource,
}

impl InMemoryTripStore {
    /// Create an empty memory store
    #[must_use]
    pub fn new() -> Self {
        Self {
            collections: Arc::new(RwLock::new(HashMap::new())),
            seed: Vec::new(),
            next_id: Arc::new(|| chrono::Utc::now().timestamp_millis()),
        }
    }

    /// Create a memory store that is seeded with [`example_trips`] on initialize
    #[must_use]
    pub fn with_example_trips() -> Self {
        Self {
            seed: example_trips(),
            ..Self::new()
        }
    }

    /// Replace the id generator (defaults to current time in milliseconds)
    #[must_use]
    pub fn with_id_source(mut self, next_id: impl Fn() -> i64 + Send + Sync + 'static) -> Self {
        self.next_id = Arc::new(next_id);
        self
    }
}

impl Default for InMemoryTripStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Sample trips shown on first launch in the browser build.
#[must_use]
pub fn example_trips() -> Vec<Trip> {
    vec![
        Trip {
            id: 1,
            destination: "París".to_string(),
            date: normalize_date("2024-12-01"),
            description: "Tour por la Torre Eiffel".to_string(),
        },
        Trip {
            id: 2,
            destination: "Tokio".to_string(),
            date: normalize_date("2025-03-15"),
            description: "Visita al Monte Fuji".to_string(),
        },
    ]
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn initialize(&self) -> CoreResult<()> {
        let mut collections = self.collections.write().await;
        if !collections.contains_key(TRIPS_COLLECTION) {
            collections.insert(TRIPS_COLLECTION.to_string(), self.seed.clone());
            log::debug!("In-memory trip store seeded with {} trips", self.seed.len());
        }
        Ok(())
    }

    async fn find_all(&self) -> CoreResult<Vec<Trip>> {
        Ok(self
            .collections
            .read()
            .await
            .get(TRIPS_COLLECTION)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert(&self, draft: &TripDraft) -> CoreResult<Trip> {
        let trip = Trip::from_draft((self.next_id)(), draft);
        self.collections
            .write()
            .await
            .entry(TRIPS_COLLECTION.to_string())
            .or_default()
            .push(trip.clone());
        Ok(trip)
    }

    async fn update(&self, id: i64, draft: &TripDraft) -> CoreResult<WriteOutcome> {
        let mut collections = self.collections.write().await;
        let existing = collections
            .get_mut(TRIPS_COLLECTION)
            .and_then(|trips| trips.iter_mut().find(|t| t.id == id));

        Ok(match existing {
            Some(trip) => {
                *trip = Trip::from_draft(id, draft);
                WriteOutcome::Applied
            }
            None => WriteOutcome::NoOp,
        })
    }

    async fn delete(&self, id: i64) -> CoreResult<WriteOutcome> {
        let mut collections = self.collections.write().await;
        let Some(trips) = collections.get_mut(TRIPS_COLLECTION) else {
            return Ok(WriteOutcome::NoOp);
        };

        Ok(match trips.iter().position(|t| t.id == id) {
            Some(index) => {
                trips.remove(index);
                WriteOutcome::Applied
            }
            None => WriteOutcome::NoOp,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    fn draft(destination: &str) -> TripDraft {
        TripDraft {
            destination: destination.to_string(),
            date: normalize_date("2024-06-01"),
            description: String::new(),
        }
    }

    fn counting_store() -> InMemoryTripStore {
        let counter = Arc::new(AtomicI64::new(100));
        InMemoryTripStore::new().with_id_source(move || counter.fetch_add(1, Ordering::SeqCst))
    }

    #[tokio::test]
    async fn seeding_happens_once() {
        let store = InMemoryTripStore::with_example_trips();
        store.initialize().await.unwrap();
        store.initialize().await.unwrap();

        let trips = store.find_all().await.unwrap();
        assert_eq!(trips.len(), 2);
        assert_eq!(trips[0].destination, "París");
        assert_eq!(trips[1].destination, "Tokio");
    }

    #[tokio::test]
    async fn find_all_without_collection_is_empty() {
        let store = InMemoryTripStore::new();
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn find_all_returns_a_snapshot() {
        let store = InMemoryTripStore::with_example_trips();
        store.initialize().await.unwrap();

        let mut snapshot = store.find_all().await.unwrap();
        snapshot.clear();

        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn insert_uses_id_source() {
        let store = counting_store();
        store.initialize().await.unwrap();

        let first = store.insert(&draft("Lima")).await.unwrap();
        let second = store.insert(&draft("Quito")).await.unwrap();

        assert_eq!(first.id, 100);
        assert_eq!(second.id, 101);
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn default_ids_are_wall_clock_millis() {
        let store = InMemoryTripStore::new();
        let before = chrono::Utc::now().timestamp_millis();
        let trip = store.insert(&draft("Oslo")).await.unwrap();
        assert!(trip.id >= before);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_id() {
        let store = counting_store();
        let trip = store.insert(&draft("Lima")).await.unwrap();

        let changed = TripDraft {
            destination: "Cusco".to_string(),
            date: 42,
            description: "Machu Picchu".to_string(),
        };
        let outcome = store.update(trip.id, &changed).await.unwrap();
        assert_eq!(outcome, WriteOutcome::Applied);

        let trips = store.find_all().await.unwrap();
        assert_eq!(trips, vec![Trip::from_draft(trip.id, &changed)]);
    }

    #[tokio::test]
    async fn update_and_delete_missing_id_are_noops() {
        let store = InMemoryTripStore::with_example_trips();
        store.initialize().await.unwrap();
        let before = store.find_all().await.unwrap();

        assert_eq!(
            store.update(999, &draft("Nowhere")).await.unwrap(),
            WriteOutcome::NoOp
        );
        assert_eq!(store.delete(999).await.unwrap(), WriteOutcome::NoOp);
        assert_eq!(store.find_all().await.unwrap(), before);
    }

    #[tokio::test]
    async fn delete_before_initialize_is_noop() {
        let store = InMemoryTripStore::new();
        assert_eq!(store.delete(1).await.unwrap(), WriteOutcome::NoOp);
    }

    #[tokio::test]
    async fn delete_removes_exactly_one() {
        let store = InMemoryTripStore::with_example_trips();
        store.initialize().await.unwrap();

        assert_eq!(store.delete(1).await.unwrap(), WriteOutcome::Applied);

        let trips = store.find_all().await.unwrap();
        assert_eq!(trips.len(), 1);
        assert!(trips.iter().all(|t| t.id != 1));
    }
}
