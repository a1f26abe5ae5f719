//! `TripStore` implementation for `SqliteTripStore`.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, EntityTrait, QueryFilter, QueryOrder,
};

use viajando_core::error::{CoreError, CoreResult};
use viajando_core::traits::TripStore;
use viajando_core::types::{Trip, TripDraft, WriteOutcome};

use super::entity::trip;
use super::SqliteTripStore;

impl trip::Model {
    /// Convert a `SeaORM` row model into a domain `Trip`.
    ///
    /// A `NULL` description reads back as an empty string.
    fn into_trip(self) -> Trip {
        Trip {
            id: self.id,
            destination: self.destination,
            date: self.date,
            description: self.description.unwrap_or_default(),
        }
    }
}

/// Convert draft values into a `SeaORM` active model; the id is left to the database.
fn draft_to_active_model(draft: &TripDraft) -> trip::ActiveModel {
    trip::ActiveModel {
        id: NotSet,
        destination: Set(draft.destination.clone()),
        date: Set(draft.date),
        description: Set(Some(draft.description.clone())),
    }
}

#[async_trait]
impl TripStore for SqliteTripStore {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn initialize(&self) -> CoreResult<()> {
        self.db.get_or_try_init(|| self.connect()).await?;
        Ok(())
    }

    async fn find_all(&self) -> CoreResult<Vec<Trip>> {
        let rows = trip::Entity::find()
            .order_by_asc(trip::Column::Id)
            .all(self.db()?)
            .await
            .map_err(|e| CoreError::StorageQuery(format!("Failed to query trips: {e}")))?;

        Ok(rows.into_iter().map(trip::Model::into_trip).collect())
    }

    async fn insert(&self, draft: &TripDraft) -> CoreResult<Trip> {
        let model = draft_to_active_model(draft)
            .insert(self.db()?)
            .await
            .map_err(|e| CoreError::StorageQuery(format!("Failed to insert trip: {e}")))?;

        Ok(model.into_trip())
    }

    async fn update(&self, id: i64, draft: &TripDraft) -> CoreResult<WriteOutcome> {
        let result = trip::Entity::update_many()
            .set(draft_to_active_model(draft))
            .filter(trip::Column::Id.eq(id))
            .exec(self.db()?)
            .await
            .map_err(|e| CoreError::StorageQuery(format!("Failed to update trip: {e}")))?;

        Ok(WriteOutcome::from_rows_affected(result.rows_affected))
    }

    async fn delete(&self, id: i64) -> CoreResult<WriteOutcome> {
        let result = trip::Entity::delete_by_id(id)
            .exec(self.db()?)
            .await
            .map_err(|e| CoreError::StorageQuery(format!("Failed to delete trip: {e}")))?;

        Ok(WriteOutcome::from_rows_affected(result.rows_affected))
    }
}
