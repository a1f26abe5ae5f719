//! 行程持久化服务

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use futures::future::{BoxFuture, FutureExt, Shared};
use tokio::sync::Mutex;

use crate::error::{CoreError, CoreResult};
use crate::traits::TripStore;
use crate::types::{Platform, Trip, TripDraft, WriteOutcome};
use crate::utils::normalize_date;

/// Initialization attempt shared by every caller that arrives while it runs.
type InitAttempt = Shared<BoxFuture<'static, CoreResult<()>>>;

/// Trip persistence service
///
/// The single CRUD surface for callers. The backing store and the platform
/// it was chosen for are fixed at construction; callers never see which
/// backend is active.
pub struct TripService {
    store: Arc<dyn TripStore>,
    platform: Platform,
    /// Set only after the store initialized successfully.
    initialized: AtomicBool,
    /// Attempt currently in flight, cleared once it settles.
    in_flight: Mutex<Option<InitAttempt>>,
}

impl TripService {
    /// 创建行程服务实例
    #[must_use]
    pub fn new(store: Arc<dyn TripStore>, platform: Platform) -> Self {
        Self {
            store,
            platform,
            initialized: AtomicBool::new(false),
            in_flight: Mutex::new(None),
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn backend_name(&self) -> &'static str {
        self.store.backend_name()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Initialize the backing store once.
    ///
    /// Concurrent callers await a single in-flight attempt and all observe
    /// its result, success or failure. A failed attempt leaves the service
    /// uninitialized and a later call starts a fresh one.
    pub async fn initialize(&self) -> CoreResult<()> {
        if self.is_initialized() {
            log::debug!("Trip storage already initialized");
            return Ok(());
        }

        let attempt = {
            let mut slot = self.in_flight.lock().await;
            if self.is_initialized() {
                return Ok(());
            }
            slot.get_or_insert_with(|| self.start_attempt()).clone()
        };

        let result = attempt.clone().await;

        let mut slot = self.in_flight.lock().await;
        if result.is_ok() {
            self.initialized.store(true, Ordering::Release);
        }
        if slot.as_ref().is_some_and(|current| current.ptr_eq(&attempt)) {
            *slot = None;
            if let Err(e) = &result {
                log::error!("Failed to initialize trip storage: {e}");
            }
        }
        result
    }

    fn start_attempt(&self) -> InitAttempt {
        let store = Arc::clone(&self.store);
        let platform = self.platform;
        async move {
            log::info!(
                "Initializing trip storage ({platform} platform, {} backend)",
                store.backend_name()
            );
            store.initialize().await?;
            log::info!("Trip storage initialized");
            Ok::<(), CoreError>(())
        }
        .boxed()
        .shared()
    }

    /// 获取所有行程
    pub async fn get_trips(&self) -> CoreResult<Vec<Trip>> {
        self.initialize().await?;

        let trips = self
            .store
            .find_all()
            .await
            .inspect_err(|e| log::error!("Failed to load trips: {e}"))?;
        log::debug!("Loaded {} trips", trips.len());
        Ok(trips)
    }

    /// Add a trip. `date` is normalized to epoch milliseconds.
    pub async fn add_trip(
        &self,
        destination: &str,
        date: &str,
        description: Option<&str>,
    ) -> CoreResult<Trip> {
        let draft = Self::build_draft(destination, date, description.unwrap_or_default())?;
        self.initialize().await?;

        let trip = self
            .store
            .insert(&draft)
            .await
            .inspect_err(|e| log::error!("Failed to add trip: {e}"))?;
        log::info!(
            "Trip added: id={} destination={} date={}",
            trip.id,
            trip.destination,
            trip.date
        );
        Ok(trip)
    }

    /// Update all fields of trip `id`. A missing id is a no-op.
    pub async fn update_trip(
        &self,
        id: i64,
        destination: &str,
        date: &str,
        description: &str,
    ) -> CoreResult<WriteOutcome> {
        let draft = Self::build_draft(destination, date, description)?;
        self.initialize().await?;

        let outcome = self
            .store
            .update(id, &draft)
            .await
            .inspect_err(|e| log::error!("Failed to update trip {id}: {e}"))?;
        match outcome {
            WriteOutcome::Applied => log::info!("Trip updated: id={id}"),
            WriteOutcome::NoOp => log::debug!("No trip with id {id}, nothing to update"),
        }
        Ok(outcome)
    }

    /// Delete trip `id`. A missing id is a no-op.
    pub async fn delete_trip(&self, id: i64) -> CoreResult<WriteOutcome> {
        self.initialize().await?;

        let outcome = self
            .store
            .delete(id)
            .await
            .inspect_err(|e| log::error!("Failed to delete trip {id}: {e}"))?;
        match outcome {
            WriteOutcome::Applied => log::info!("Trip deleted: id={id}"),
            WriteOutcome::NoOp => log::debug!("No trip with id {id}, nothing to delete"),
        }
        Ok(outcome)
    }

    fn build_draft(destination: &str, date: &str, description: &str) -> CoreResult<TripDraft> {
        if destination.trim().is_empty() {
            return Err(CoreError::ValidationError(
                "Destination cannot be empty".to_string(),
            ));
        }

        Ok(TripDraft {
            destination: destination.to_string(),
            date: normalize_date(date),
            description: description.to_string(),
        })
    }
}
