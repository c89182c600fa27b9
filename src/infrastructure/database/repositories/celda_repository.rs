//! SeaORM implementation of CeldaRepository and CeldaAuditRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, Condition, ConnectionTrait,
    DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
    TransactionTrait,
};
use tracing::{debug, warn};

use crate::domain::celda::{
    Celda, CeldaAuditRepository, CeldaFilter, CeldaRepository, CeldaStatusAudit, NewCelda,
    Registro, StatusChange,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{celda, celda_status_audit, registro};

pub struct SeaOrmCeldaRepository {
    db: DatabaseConnection,
}

impl SeaOrmCeldaRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

pub struct SeaOrmCeldaAuditRepository {
    db: DatabaseConnection,
}

impl SeaOrmCeldaAuditRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn registro_from_model(model: registro::Model) -> Registro {
    Registro {
        id: model.id_registro,
        id_celda: model.id_celda,
        placa: model.placa,
        fecha_entrada: model.fecha_entrada,
        fecha_salida: model.fecha_salida,
    }
}

fn celda_from_model(model: celda::Model, registros: Vec<registro::Model>) -> Celda {
    Celda {
        id: model.id_celda,
        nombre_celda: model.nombre_celda,
        id_tipo_vehiculo: model.id_tipo_vehiculo,
        id_estado: model.id_estado,
        registros: registros.into_iter().map(registro_from_model).collect(),
    }
}

fn audit_from_model(model: celda_status_audit::Model) -> CeldaStatusAudit {
    CeldaStatusAudit {
        id: model.id,
        id_celda: model.id_celda,
        estado_anterior: model.estado_anterior,
        estado_nuevo: model.estado_nuevo,
        registrado_en: model.registrado_en,
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

/// Unique-index violations on `nombre_celda` become `DuplicateName`.
fn write_err(e: DbErr, nombre_celda: &str) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::DuplicateName(nombre_celda.to_string())
        }
        _ => db_err(e),
    }
}

/// Write the cell row and, when given, its audit entry on `conn`.
async fn write_update<C: ConnectionTrait>(
    conn: &C,
    celda: Celda,
    audit: Option<StatusChange>,
) -> DomainResult<(Celda, Option<CeldaStatusAudit>)> {
    let id = celda.id;
    let active = celda::ActiveModel {
        id_celda: Set(id),
        nombre_celda: Set(celda.nombre_celda.clone()),
        id_tipo_vehiculo: Set(celda.id_tipo_vehiculo),
        id_estado: Set(celda.id_estado),
    };

    let model = active.update(conn).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => DomainError::not_found("Celda", id),
        other => write_err(other, &celda.nombre_celda),
    })?;

    let audit = match audit {
        Some(change) => {
            let entry = celda_status_audit::ActiveModel {
                id: NotSet,
                id_celda: Set(change.id_celda),
                estado_anterior: Set(change.estado_anterior),
                estado_nuevo: Set(change.estado_nuevo),
                registrado_en: Set(change.registrado_en),
            }
            .insert(conn)
            .await
            .map_err(db_err)?;
            Some(audit_from_model(entry))
        }
        None => None,
    };

    Ok((celda_from_model(model, Vec::new()), audit))
}

/// Translate a [`CeldaFilter`] into a SeaORM condition: one `=` clause per
/// supplied field, joined with AND.
pub(crate) fn filter_condition(filter: &CeldaFilter) -> Condition {
    let mut condition = Condition::all();
    if let Some(tipo) = filter.id_tipo_vehiculo {
        condition = condition.add(celda::Column::IdTipoVehiculo.eq(tipo));
    }
    if let Some(estado) = filter.id_estado {
        condition = condition.add(celda::Column::IdEstado.eq(estado));
    }
    condition
}

// ── Repository implementation ───────────────────────────────────

#[async_trait]
impl CeldaRepository for SeaOrmCeldaRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Celda>> {
        let model = celda::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(|m| celda_from_model(m, Vec::new())))
    }

    async fn find_all_with_registros(&self) -> DomainResult<Vec<Celda>> {
        let rows = celda::Entity::find()
            .find_with_related(registro::Entity)
            .order_by_asc(celda::Column::IdCelda)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, registros)| celda_from_model(model, registros))
            .collect())
    }

    async fn find_by_filter(&self, filter: &CeldaFilter) -> DomainResult<Vec<Celda>> {
        let models = celda::Entity::find()
            .filter(filter_condition(filter))
            .order_by_asc(celda::Column::IdCelda)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models
            .into_iter()
            .map(|m| celda_from_model(m, Vec::new()))
            .collect())
    }

    async fn count_by_filter(&self, filter: &CeldaFilter) -> DomainResult<u64> {
        celda::Entity::find()
            .filter(filter_condition(filter))
            .count(&self.db)
            .await
            .map_err(db_err)
    }

    async fn insert(&self, nueva: NewCelda) -> DomainResult<Celda> {
        let id_estado = nueva.estado_inicial();
        let active = celda::ActiveModel {
            id_celda: NotSet,
            nombre_celda: Set(nueva.nombre_celda.clone()),
            id_tipo_vehiculo: Set(nueva.id_tipo_vehiculo),
            id_estado: Set(id_estado),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, &nueva.nombre_celda))?;

        debug!(id = model.id_celda, nombre = %model.nombre_celda, "Celda inserted");
        Ok(celda_from_model(model, Vec::new()))
    }

    async fn update_audited(
        &self,
        celda: Celda,
        audit: Option<StatusChange>,
    ) -> DomainResult<(Celda, Option<CeldaStatusAudit>)> {
        let txn = self.db.begin().await.map_err(db_err)?;

        match write_update(&txn, celda, audit).await {
            Ok(written) => {
                txn.commit().await.map_err(db_err)?;
                Ok(written)
            }
            Err(e) => {
                if let Err(rollback) = txn.rollback().await {
                    warn!("Celda update rollback failed: {}", rollback);
                }
                Err(e)
            }
        }
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = celda::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[async_trait]
impl CeldaAuditRepository for SeaOrmCeldaAuditRepository {
    async fn find_by_celda(&self, id_celda: i32) -> DomainResult<Vec<CeldaStatusAudit>> {
        let models = celda_status_audit::Entity::find()
            .filter(celda_status_audit::Column::IdCelda.eq(id_celda))
            .order_by_desc(celda_status_audit::Column::RegistradoEn)
            .order_by_desc(celda_status_audit::Column::Id)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(models.into_iter().map(audit_from_model).collect())
    }
}
