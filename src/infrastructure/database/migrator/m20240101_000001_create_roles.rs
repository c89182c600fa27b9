//! Create roles table and seed the built-in roles

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Roles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Roles::IdRol)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Roles::Nombre).string().not_null().unique_key())
                    .to_owned(),
            )
            .await?;

        let seed = Query::insert()
            .into_table(Roles::Table)
            .columns([Roles::IdRol, Roles::Nombre])
            .values_panic([1.into(), "Administrador".into()])
            .values_panic([2.into(), "Operador".into()])
            .to_owned();

        manager.exec_stmt(seed).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Roles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Roles {
    Table,
    IdRol,
    Nombre,
}
