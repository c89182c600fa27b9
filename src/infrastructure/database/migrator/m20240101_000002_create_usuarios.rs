//! Create usuarios table

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_roles::Roles;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::IdUsuario)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Usuarios::Nombre).string().not_null())
                    .col(ColumnDef::new(Usuarios::Email).string().not_null())
                    .col(ColumnDef::new(Usuarios::Contrasena).string().not_null())
                    .col(ColumnDef::new(Usuarios::IdRol).integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_usuarios_rol")
                            .from(Usuarios::Table, Usuarios::IdRol)
                            .to(Roles::Table, Roles::IdRol)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .to_owned(),
            )
            .await?;

        // Email uniqueness lives in the database so concurrent
        // registrations cannot both succeed
        manager
            .create_index(
                Index::create()
                    .name("idx_usuarios_email")
                    .table(Usuarios::Table)
                    .col(Usuarios::Email)
                    .unique()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Usuarios {
    Table,
    IdUsuario,
    Nombre,
    Email,
    Contrasena,
    IdRol,
}
