//! Domain layer: entities, value types and repository ports

pub mod celda;
pub mod repositories;
pub mod usuario;

pub use celda::{
    Celda, CeldaAuditRepository, CeldaChanges, CeldaFilter, CeldaRepository, CeldaStatusAudit,
    EstadoCelda, NewCelda, Registro, StatusChange,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use usuario::{
    Credenciales, NewUsuario, Rol, Usuario, UsuarioChanges, UsuarioPatch, UsuarioRecord,
    UsuarioRepository,
};

pub use crate::shared::errors::DomainError;
