//! Celdas module: parking-cell lifecycle, status tracking and availability

pub mod service;

pub use service::{CeldaExport, CeldaService};
