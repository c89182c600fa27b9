//! Usuario aggregate
//!
//! Contains the Usuario entity, its role, the input types and the repository
//! interface.

pub mod model;
pub mod repository;

pub use model::{
    Credenciales, NewUsuario, Rol, Usuario, UsuarioChanges, UsuarioPatch, UsuarioRecord,
    ROL_ADMINISTRADOR, ROL_OPERADOR,
};
pub use repository::UsuarioRepository;
