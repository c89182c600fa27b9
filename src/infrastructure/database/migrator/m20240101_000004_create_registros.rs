//! Create registros table

use sea_orm_migration::prelude::*;

use super::m20240101_000003_create_celdas::Celdas;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Registros::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Registros::IdRegistro)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Registros::IdCelda).integer())
                    .col(ColumnDef::new(Registros::Placa).string().not_null())
                    .col(
                        ColumnDef::new(Registros::FechaEntrada)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Registros::FechaSalida).timestamp_with_time_zone())
                    // History survives deletion of the cell
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_registros_celda")
                            .from(Registros::Table, Registros::IdCelda)
                            .to(Celdas::Table, Celdas::IdCelda)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_registros_celda")
                    .table(Registros::Table)
                    .col(Registros::IdCelda)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Registros::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Registros {
    Table,
    IdRegistro,
    IdCelda,
    Placa,
    FechaEntrada,
    FechaSalida,
}
