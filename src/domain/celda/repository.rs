//! Celda repository interfaces

use async_trait::async_trait;

use super::filter::CeldaFilter;
use super::model::{Celda, CeldaStatusAudit, NewCelda, StatusChange};
use crate::domain::DomainResult;

#[async_trait]
pub trait CeldaRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Celda>>;
    /// All cells with their registros loaded.
    async fn find_all_with_registros(&self) -> DomainResult<Vec<Celda>>;
    async fn find_by_filter(&self, filter: &CeldaFilter) -> DomainResult<Vec<Celda>>;
    async fn count_by_filter(&self, filter: &CeldaFilter) -> DomainResult<u64>;
    /// Fails with `DuplicateName` when the name is taken; nothing is written then.
    async fn insert(&self, celda: NewCelda) -> DomainResult<Celda>;
    /// Persist every field of an existing cell together with `audit`, as one
    /// unit: if either write fails neither is kept. Fails with
    /// `DuplicateName` on a name collision and `NotFound` if the row is gone.
    async fn update_audited(
        &self,
        celda: Celda,
        audit: Option<StatusChange>,
    ) -> DomainResult<(Celda, Option<CeldaStatusAudit>)>;
    /// `false` when no such cell existed.
    async fn delete(&self, id: i32) -> DomainResult<bool>;
}

#[async_trait]
pub trait CeldaAuditRepository: Send + Sync {
    /// Newest first. Entries are written by [`CeldaRepository::update_audited`].
    async fn find_by_celda(&self, id_celda: i32) -> DomainResult<Vec<CeldaStatusAudit>>;
}
