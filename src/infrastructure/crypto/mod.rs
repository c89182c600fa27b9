//! Password hashing and JWT helpers

pub mod jwt;
pub mod password;
