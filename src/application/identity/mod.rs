//! Identity module: usuario management & authentication
//!
//! Contains the `UsuarioService` which orchestrates all usuario-related
//! use-cases: login, registration, profile reads, updates and start-up
//! seeding of the administrator.

pub mod service;

pub use service::{AuthResult, UsuarioService};
