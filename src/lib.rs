//! # Parking Service
//!
//! REST backend for a parking lot: cells (`celdas`) with a vehicle type and
//! an availability status, their vehicle entries (`registros`), and the
//! operators (`usuarios`) who log in to manage them.
//!
//! ## Layout
//!
//! - **domain**: entities, filters and repository ports
//! - **application**: `CeldaService` and `UsuarioService` use cases
//! - **infrastructure**: SeaORM repositories, migrations, in-memory storage, crypto
//! - **interfaces**: axum router, handlers and OpenAPI docs
//! - **server**: process lifecycle shared by both binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::{create_api_router, ApiDependencies};
