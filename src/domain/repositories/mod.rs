//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::celda::{CeldaAuditRepository, CeldaRepository};
use super::usuario::UsuarioRepository;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let celda = repos.celdas().find_by_id(1).await?;
///     let usuarios = repos.usuarios().find_all().await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn celdas(&self) -> &dyn CeldaRepository;
    fn celda_audit(&self) -> &dyn CeldaAuditRepository;
    fn usuarios(&self) -> &dyn UsuarioRepository;
}
