//! Celda DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::CeldaExport;
use crate::domain::{Celda, CeldaChanges, CeldaFilter, CeldaStatusAudit, NewCelda, Registro};
use crate::interfaces::http::common::non_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateCeldaRequest {
    /// Unique, case-sensitive
    #[validate(custom(function = "non_blank"))]
    pub nombre_celda: String,
    #[validate(range(min = 1, message = "id_tipo_vehiculo must be a positive id"))]
    pub id_tipo_vehiculo: i32,
    /// Defaults to 1 (Disponible)
    #[validate(range(min = 1, message = "id_estado must be a positive id"))]
    pub id_estado: Option<i32>,
}

impl From<CreateCeldaRequest> for NewCelda {
    fn from(req: CreateCeldaRequest) -> Self {
        Self {
            nombre_celda: req.nombre_celda,
            id_tipo_vehiculo: req.id_tipo_vehiculo,
            id_estado: req.id_estado,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCeldaRequest {
    #[validate(custom(function = "non_blank"))]
    pub nombre_celda: Option<String>,
    #[validate(range(min = 1, message = "id_tipo_vehiculo must be a positive id"))]
    pub id_tipo_vehiculo: Option<i32>,
    #[validate(range(min = 1, message = "id_estado must be a positive id"))]
    pub id_estado: Option<i32>,
}

impl From<UpdateCeldaRequest> for CeldaChanges {
    fn from(req: UpdateCeldaRequest) -> Self {
        Self {
            nombre_celda: req.nombre_celda,
            id_tipo_vehiculo: req.id_tipo_vehiculo,
            id_estado: req.id_estado,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateEstadoRequest {
    /// 1 = Disponible, 2 = Ocupada, 3 = Mantenimiento
    #[validate(range(min = 1, max = 3, message = "id_estado must be 1, 2 or 3"))]
    pub id_estado: i32,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CeldaQuery {
    /// Filter by vehicle type
    pub id_tipo_vehiculo: Option<i32>,
    /// Filter by status
    pub id_estado: Option<i32>,
}

impl From<CeldaQuery> for CeldaFilter {
    fn from(q: CeldaQuery) -> Self {
        CeldaFilter::new(q.id_tipo_vehiculo, q.id_estado)
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct DisponibilidadQuery {
    /// Vehicle type to count (required)
    pub id_tipo_vehiculo: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegistroDto {
    pub id: i32,
    pub id_celda: Option<i32>,
    pub placa: String,
    pub fecha_entrada: DateTime<Utc>,
    pub fecha_salida: Option<DateTime<Utc>>,
}

impl From<Registro> for RegistroDto {
    fn from(r: Registro) -> Self {
        Self {
            id: r.id,
            id_celda: r.id_celda,
            placa: r.placa,
            fecha_entrada: r.fecha_entrada,
            fecha_salida: r.fecha_salida,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CeldaDto {
    pub id: i32,
    pub nombre_celda: String,
    pub id_tipo_vehiculo: i32,
    pub id_estado: i32,
    /// Only on the unfiltered listing
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registros: Option<Vec<RegistroDto>>,
}

impl CeldaDto {
    pub fn with_registros(mut celda: Celda) -> Self {
        let registros = std::mem::take(&mut celda.registros)
            .into_iter()
            .map(RegistroDto::from)
            .collect();
        Self {
            registros: Some(registros),
            ..Self::from(celda)
        }
    }
}

impl From<Celda> for CeldaDto {
    fn from(c: Celda) -> Self {
        Self {
            id: c.id,
            nombre_celda: c.nombre_celda,
            id_tipo_vehiculo: c.id_tipo_vehiculo,
            id_estado: c.id_estado,
            registros: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DisponibilidadDto {
    pub id_tipo_vehiculo: i32,
    pub celdas_disponibles: u64,
}

/// One exported cell. Ids only, no registros.
#[derive(Debug, Serialize, ToSchema)]
pub struct ExportRowDto {
    pub id: i32,
    pub nombre: String,
    pub tipo_vehiculo: i32,
    pub estado: i32,
}

impl From<Celda> for ExportRowDto {
    fn from(c: Celda) -> Self {
        Self {
            id: c.id,
            nombre: c.nombre_celda,
            tipo_vehiculo: c.id_tipo_vehiculo,
            estado: c.id_estado,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CeldaExportDto {
    pub fecha_exportacion: DateTime<Utc>,
    pub total_celdas: usize,
    pub celdas: Vec<ExportRowDto>,
}

impl From<CeldaExport> for CeldaExportDto {
    fn from(e: CeldaExport) -> Self {
        Self {
            fecha_exportacion: e.fecha_exportacion,
            total_celdas: e.total_celdas,
            celdas: e.celdas.into_iter().map(ExportRowDto::from).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EstadoAuditDto {
    pub id: i32,
    pub id_celda: i32,
    pub estado_anterior: i32,
    pub estado_nuevo: i32,
    pub registrado_en: DateTime<Utc>,
}

impl From<CeldaStatusAudit> for EstadoAuditDto {
    fn from(a: CeldaStatusAudit) -> Self {
        Self {
            id: a.id,
            id_celda: a.id_celda,
            estado_anterior: a.estado_anterior,
            estado_nuevo: a.estado_nuevo,
            registrado_en: a.registrado_en,
        }
    }
}
