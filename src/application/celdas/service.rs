//! Celda service: parking-cell use-cases
//!
//! Holds no state of its own; every call goes through the repositories.
//! Name uniqueness is left to storage so that concurrent creates with the
//! same name cannot both succeed.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::domain::{
    Celda, CeldaChanges, CeldaFilter, CeldaStatusAudit, DomainError, DomainResult, EstadoCelda,
    NewCelda, RepositoryProvider,
};

/// Point-in-time dump of every cell with its registros
#[derive(Debug, Clone)]
pub struct CeldaExport {
    pub fecha_exportacion: DateTime<Utc>,
    pub total_celdas: usize,
    pub celdas: Vec<Celda>,
}

pub struct CeldaService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CeldaService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Cells currently in Disponible.
    pub async fn list_available(&self) -> DomainResult<Vec<Celda>> {
        self.repos
            .celdas()
            .find_by_filter(&CeldaFilter::by_estado(EstadoCelda::Disponible))
            .await
    }

    /// Every cell with its registros.
    pub async fn list_all(&self) -> DomainResult<Vec<Celda>> {
        self.repos.celdas().find_all_with_registros().await
    }

    /// Cells matching every supplied filter; an empty filter returns all cells.
    pub async fn list_by_filters(&self, filter: CeldaFilter) -> DomainResult<Vec<Celda>> {
        self.repos.celdas().find_by_filter(&filter).await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Option<Celda>> {
        self.repos.celdas().find_by_id(id).await
    }

    pub async fn count_available_by_type(&self, id_tipo_vehiculo: i32) -> DomainResult<u64> {
        self.repos
            .celdas()
            .count_by_filter(&CeldaFilter::available_of_type(id_tipo_vehiculo))
            .await
    }

    pub async fn export(&self) -> DomainResult<CeldaExport> {
        let celdas = self.list_by_filters(CeldaFilter::default()).await?;
        Ok(CeldaExport {
            fecha_exportacion: Utc::now(),
            total_celdas: celdas.len(),
            celdas,
        })
    }

    /// Audited status transitions of a cell, newest first.
    pub async fn status_history(&self, id: i32) -> DomainResult<Vec<CeldaStatusAudit>> {
        if self.repos.celdas().find_by_id(id).await?.is_none() {
            return Err(DomainError::not_found("Celda", id));
        }
        self.repos.celda_audit().find_by_celda(id).await
    }

    // ── Commands ────────────────────────────────────────────────

    pub async fn create(&self, nueva: NewCelda) -> DomainResult<Celda> {
        let celda = self.repos.celdas().insert(nueva).await?;
        info!(
            id = celda.id,
            nombre = %celda.nombre_celda,
            id_estado = celda.id_estado,
            "Celda created"
        );
        Ok(celda)
    }

    /// Merge `changes` onto an existing cell. `None` when the cell is absent.
    pub async fn update(&self, id: i32, changes: CeldaChanges) -> DomainResult<Option<Celda>> {
        let Some(mut celda) = self.repos.celdas().find_by_id(id).await? else {
            return Ok(None);
        };

        let change = celda.apply(changes);
        match self.repos.celdas().update_audited(celda, change).await {
            Ok((updated, audit)) => {
                debug!(id, "Celda updated");
                if let Some(audit) = audit {
                    log_transition(&audit);
                }
                Ok(Some(updated))
            }
            Err(DomainError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set the status of a cell. Any status id is accepted here; transitions
    /// entering or leaving Mantenimiento are written to the audit trail.
    pub async fn update_status(&self, id: i32, id_estado: i32) -> DomainResult<Celda> {
        let mut celda = self
            .repos
            .celdas()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Celda", id))?;

        let change = celda.change_status(id_estado);
        let (updated, audit) = self.repos.celdas().update_audited(celda, change).await?;
        if let Some(audit) = audit {
            log_transition(&audit);
        }

        metrics::counter!("celda_status_changes_total", "estado" => id_estado.to_string())
            .increment(1);

        Ok(updated)
    }

    /// `true` if a cell was removed. Its registros are kept without a cell.
    pub async fn delete(&self, id: i32) -> DomainResult<bool> {
        let removed = self.repos.celdas().delete(id).await?;
        if removed {
            info!(id, "Celda deleted");
        }
        Ok(removed)
    }
}

fn log_transition(audit: &CeldaStatusAudit) {
    info!(
        id_celda = audit.id_celda,
        estado_anterior = audit.estado_anterior,
        estado_nuevo = audit.estado_nuevo,
        "Celda maintenance transition recorded"
    );
}
