//! Celda aggregate
//!
//! Contains the Celda entity, its status enum, the query filter and the
//! repository interfaces.

pub mod filter;
pub mod model;
pub mod repository;

pub use filter::CeldaFilter;
pub use model::{
    touches_mantenimiento, Celda, CeldaChanges, CeldaStatusAudit, EstadoCelda, NewCelda,
    Registro, StatusChange,
};
pub use repository::{CeldaAuditRepository, CeldaRepository};
