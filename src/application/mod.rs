//! Application layer: use-case services shared by the HTTP handlers

pub mod celdas;
pub mod identity;

pub use celdas::{CeldaExport, CeldaService};
pub use identity::{AuthResult, UsuarioService};
