//! `SeaORM` entity for the `viajes` table.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "viajes")]
/// Database row model for a trip.
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_name = "destino")]
    pub destination: String,
    /// Epoch milliseconds
    #[sea_orm(column_name = "fecha")]
    pub date: i64,
    #[sea_orm(column_name = "descripcion")]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
