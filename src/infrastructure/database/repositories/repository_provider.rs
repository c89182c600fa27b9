//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::celda::{CeldaAuditRepository, CeldaRepository};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::usuario::UsuarioRepository;

use super::celda_repository::{SeaOrmCeldaAuditRepository, SeaOrmCeldaRepository};
use super::usuario_repository::SeaOrmUsuarioRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let celda = repos.celdas().find_by_id(1).await?;
/// let historial = repos.celda_audit().find_by_celda(1).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    celdas: SeaOrmCeldaRepository,
    celda_audit: SeaOrmCeldaAuditRepository,
    usuarios: SeaOrmUsuarioRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            celdas: SeaOrmCeldaRepository::new(db.clone()),
            celda_audit: SeaOrmCeldaAuditRepository::new(db.clone()),
            usuarios: SeaOrmUsuarioRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn celdas(&self) -> &dyn CeldaRepository {
        &self.celdas
    }

    fn celda_audit(&self) -> &dyn CeldaAuditRepository {
        &self.celda_audit
    }

    fn usuarios(&self) -> &dyn UsuarioRepository {
        &self.usuarios
    }
}
