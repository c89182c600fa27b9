//! Celdas module: parking-cell CRUD, status, availability and export

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
