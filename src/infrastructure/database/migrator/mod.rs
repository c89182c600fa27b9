//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20240101_000001_create_roles;
mod m20240101_000002_create_usuarios;
mod m20240101_000003_create_celdas;
mod m20240101_000004_create_registros;
mod m20240101_000005_create_celda_status_audit;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_roles::Migration),
            Box::new(m20240101_000002_create_usuarios::Migration),
            Box::new(m20240101_000003_create_celdas::Migration),
            Box::new(m20240101_000004_create_registros::Migration),
            Box::new(m20240101_000005_create_celda_status_audit::Migration),
        ]
    }
}
