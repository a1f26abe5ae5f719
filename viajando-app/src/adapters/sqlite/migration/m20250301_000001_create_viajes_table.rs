use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // viajes 表
        manager
            .create_table(
                Table::create()
                    .table(Viajes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Viajes::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Viajes::Destino).text().not_null())
                    .col(ColumnDef::new(Viajes::Fecha).big_integer().not_null())
                    .col(ColumnDef::new(Viajes::Descripcion).text().null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Viajes::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Viajes {
    #[sea_orm(iden = "viajes")]
    Table,
    Id,
    Destino,
    Fecha,
    Descripcion,
}
