pub mod auth;
pub mod celdas;
pub mod health;
pub mod metrics;
pub mod request_id;
pub mod usuarios;
