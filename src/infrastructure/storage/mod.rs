//! Non-persistent storage backends

mod memory;

pub use memory::{
    InMemoryCeldaAuditRepository, InMemoryCeldaRepository, InMemoryRepositoryProvider,
    InMemoryUsuarioRepository,
};
