use async_trait::async_trait;

use super::model::{Credenciales, Usuario, UsuarioPatch, UsuarioRecord};
use crate::domain::DomainResult;

#[async_trait]
pub trait UsuarioRepository: Send + Sync {
    /// Fails with `DuplicateEmail` when the email is taken and `Validation`
    /// when the role does not exist.
    async fn insert(&self, record: UsuarioRecord) -> DomainResult<Usuario>;

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Usuario>>;
    async fn find_all(&self) -> DomainResult<Vec<Usuario>>;
    async fn find_credentials_by_email(&self, email: &str) -> DomainResult<Option<Credenciales>>;
    async fn count(&self) -> DomainResult<u64>;

    /// `None` when no such user exists.
    async fn update(&self, id: i32, patch: UsuarioPatch) -> DomainResult<Option<Usuario>>;
    /// `false` when no such user existed.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}
