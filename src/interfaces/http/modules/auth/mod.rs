//! Authentication module: login and public registration

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
