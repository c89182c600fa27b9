//! Create celda_status_audit table

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CeldaStatusAudit::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CeldaStatusAudit::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(CeldaStatusAudit::IdCelda).integer().not_null())
                    .col(
                        ColumnDef::new(CeldaStatusAudit::EstadoAnterior)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CeldaStatusAudit::EstadoNuevo)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CeldaStatusAudit::RegistradoEn)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_celda_status_audit_celda")
                    .table(CeldaStatusAudit::Table)
                    .col(CeldaStatusAudit::IdCelda)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CeldaStatusAudit::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum CeldaStatusAudit {
    Table,
    Id,
    IdCelda,
    EstadoAnterior,
    EstadoNuevo,
    RegistradoEn,
}
