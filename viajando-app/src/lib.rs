//! Platform-aware application bootstrap for Viajando.
//!
//! Provides `AppState` (service container), `AppStateBuilder` (backend
//! selection and adapter injection) and `StorageConfig`.

pub mod adapters;
pub mod config;

use std::sync::Arc;

use viajando_core::error::CoreResult;
use viajando_core::services::TripService;
use viajando_core::traits::{InMemoryTripStore, TripStore};
use viajando_core::types::Platform;

pub use config::StorageConfig;

/// Detect the platform this build runs on.
///
/// `Native` only when the durable store is compiled in and the target is
/// not WebAssembly.
#[must_use]
pub fn detect_platform() -> Platform {
    if cfg!(feature = "sqlite-store") && !cfg!(target_family = "wasm") {
        Platform::Native
    } else {
        Platform::Web
    }
}

/// Platform-agnostic application state.
///
/// Every frontend constructs this once at startup via `AppStateBuilder`
/// and hands `trip_service` to its components.
pub struct AppState {
    /// Configuration the state was built from
    pub config: StorageConfig,
    /// Trip persistence service
    pub trip_service: Arc<TripService>,
}

impl AppState {
    /// Platform chosen at build time
    pub fn platform(&self) -> Platform {
        self.trip_service.platform()
    }

    /// Eagerly initialize storage so that a broken database surfaces at startup.
    pub async fn run_startup(&self) -> CoreResult<()> {
        self.trip_service.initialize().await?;
        log::info!(
            "Storage ready ({} platform, {} backend)",
            self.platform(),
            self.trip_service.backend_name()
        );
        if !self.platform().is_durable() {
            log::warn!("Trips are kept in memory and will be lost on exit");
        }
        Ok(())
    }
}

/// Builder for constructing `AppState`.
///
/// Platform resolution order: `platform()` override, `StorageConfig::platform`,
/// then [`detect_platform`]. The backend follows from the platform unless a
/// store is injected with `trip_store()`.
pub struct AppStateBuilder {
    config: Option<StorageConfig>,
    platform: Option<Platform>,
    trip_store: Option<Arc<dyn TripStore>>,
}

impl AppStateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: None,
            platform: None,
            trip_store: None,
        }
    }

    #[must_use]
    pub fn config(mut self, config: StorageConfig) -> Self {
        self.config = Some(config);
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: Platform) -> Self {
        self.platform = Some(platform);
        self
    }

    #[must_use]
    pub fn trip_store(mut self, store: Arc<dyn TripStore>) -> Self {
        self.trip_store = Some(store);
        self
    }

    /// Build the `AppState`.
    ///
    /// # Errors
    /// Returns `CoreError::ValidationError` if `Native` is requested but the
    /// durable store is not compiled in.
    pub fn build(self) -> CoreResult<AppState> {
        let config = self.config.unwrap_or_default();
        let platform = self
            .platform
            .or(config.platform)
            .unwrap_or_else(detect_platform);

        let store = match self.trip_store {
            Some(store) => store,
            None => create_store(platform, &config)?,
        };

        log::debug!(
            "Selected {} backend for {} platform",
            store.backend_name(),
            platform
        );

        Ok(AppState {
            trip_service: Arc::new(TripService::new(store, platform)),
            config,
        })
    }
}

impl Default for AppStateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn create_store(platform: Platform, config: &StorageConfig) -> CoreResult<Arc<dyn TripStore>> {
    match platform {
        Platform::Native => native_store(config),
        Platform::Web => {
            log::info!("Web mode: using in-memory trip storage");
            let store = if config.seed_examples {
                InMemoryTripStore::with_example_trips()
            } else {
                InMemoryTripStore::new()
            };
            Ok(Arc::new(store))
        }
    }
}

#[cfg(feature = "sqlite-store")]
#[allow(clippy::unnecessary_wraps)]
fn native_store(config: &StorageConfig) -> CoreResult<Arc<dyn TripStore>> {
    Ok(Arc::new(adapters::SqliteTripStore::new(
        config.database_path(),
    )))
}

#[cfg(not(feature = "sqlite-store"))]
fn native_store(_config: &StorageConfig) -> CoreResult<Arc<dyn TripStore>> {
    Err(viajando_core::error::CoreError::ValidationError(
        "native platform requires the sqlite-store feature".to_string(),
    ))
}
