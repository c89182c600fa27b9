//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod celda_repository;
pub mod repository_provider;
pub mod usuario_repository;

pub use celda_repository::{SeaOrmCeldaAuditRepository, SeaOrmCeldaRepository};
pub use repository_provider::SeaOrmRepositoryProvider;
pub use usuario_repository::SeaOrmUsuarioRepository;
