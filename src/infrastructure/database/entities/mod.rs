//! Database entities module

pub mod celda;
pub mod celda_status_audit;
pub mod registro;
pub mod rol;
pub mod usuario;

pub use celda::Entity as Celda;
pub use celda_status_audit::Entity as CeldaStatusAudit;
pub use registro::Entity as Registro;
pub use rol::Entity as Rol;
pub use usuario::Entity as Usuario;
