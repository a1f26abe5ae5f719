//! SQLite-based durable trip store using `SeaORM`.
//!
//! `SqliteTripStore` implements `TripStore` against a single on-device
//! `SQLite` database file holding the `viajes` table.

pub(crate) mod entity;
mod migration;
mod trip_repo;

use std::path::{Path, PathBuf};

use sea_orm::{Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;
use tokio::sync::OnceCell;
use viajando_core::error::{CoreError, CoreResult};

use migration::Migrator;

/// Durable trip store for native platforms.
///
/// The connection is opened by `TripStore::initialize`, which also creates
/// the `viajes` table if it does not exist. Queries issued before that fail
/// with `CoreError::StorageQuery`.
pub struct SqliteTripStore {
    db_path: PathBuf,
    db: OnceCell<DatabaseConnection>,
}

impl SqliteTripStore {
    /// Create a store for `db_path` (file and parent directory are created on initialize).
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            db: OnceCell::new(),
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Close the connection, if it was opened.
    pub async fn close(mut self) -> CoreResult<()> {
        if let Some(db) = self.db.take() {
            db.close()
                .await
                .map_err(|e| CoreError::StorageQuery(format!("Failed to close SQLite: {e}")))?;
            log::debug!("SQLite trip store closed: {}", self.db_path.display());
        }
        Ok(())
    }

    /// Open the database and bring the schema up to date.
    async fn connect(&self) -> CoreResult<DatabaseConnection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| CoreError::StorageInit(format!("Failed to create directory: {e}")))?;
        }

        let db_url = format!("sqlite://{}?mode=rwc", self.db_path.display());
        let db = Database::connect(&db_url)
            .await
            .map_err(|e| CoreError::StorageInit(format!("Failed to connect to SQLite: {e}")))?;

        // The table must exist before the store is used.
        Migrator::up(&db, None)
            .await
            .map_err(|e| CoreError::StorageInit(format!("Failed to run migrations: {e}")))?;

        log::info!("SQLite trip store ready: {}", self.db_path.display());
        Ok(db)
    }

    /// Returns the open connection, or an error if not initialized.
    fn db(&self) -> CoreResult<&DatabaseConnection> {
        self.db.get().ok_or_else(|| {
            CoreError::StorageQuery(
                "SQLite trip store not initialized -- call initialize() first".to_string(),
            )
        })
    }
}
