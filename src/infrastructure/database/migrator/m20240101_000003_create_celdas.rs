//! Create celdas table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Celdas::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Celdas::IdCelda)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Celdas::NombreCelda).string().not_null())
                    .col(ColumnDef::new(Celdas::IdTipoVehiculo).integer().not_null())
                    .col(
                        ColumnDef::new(Celdas::IdEstado)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_celdas_nombre")
                    .table(Celdas::Table)
                    .col(Celdas::NombreCelda)
                    .unique()
                    .to_owned(),
            )
            .await?;

        // Availability counts filter on both columns
        manager
            .create_index(
                Index::create()
                    .name("idx_celdas_tipo_estado")
                    .table(Celdas::Table)
                    .col(Celdas::IdTipoVehiculo)
                    .col(Celdas::IdEstado)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Celdas::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Celdas {
    Table,
    IdCelda,
    NombreCelda,
    IdTipoVehiculo,
    IdEstado,
}
