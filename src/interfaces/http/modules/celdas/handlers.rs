//! Celda API handlers
//!
//! Thin wrappers over `CeldaService`. Range checks on status ids happen
//! here; the service accepts any integer.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Json,
};

use super::dto::{
    CeldaDto, CeldaExportDto, CeldaQuery, CreateCeldaRequest, DisponibilidadDto,
    DisponibilidadQuery, EstadoAuditDto, UpdateCeldaRequest, UpdateEstadoRequest,
};
use crate::application::CeldaService;
use crate::domain::CeldaFilter;
use crate::interfaces::http::common::{
    bad_request, domain_error, not_found, ApiError, ApiPath, ApiQuery, ApiResponse,
    ValidatedJson,
};

#[derive(Clone)]
pub struct CeldaHandlerState {
    pub service: Arc<CeldaService>,
}

fn celda_not_found<T>(id: i32) -> ApiError<T> {
    not_found(format!("Celda {} no encontrada", id))
}

#[utoipa::path(
    get,
    path = "/api/v1/celdas/available",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Cells in Disponible", body = ApiResponse<Vec<CeldaDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_available(
    State(state): State<CeldaHandlerState>,
) -> Result<Json<ApiResponse<Vec<CeldaDto>>>, ApiError<Vec<CeldaDto>>> {
    let celdas = state.service.list_available().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        celdas.into_iter().map(CeldaDto::from).collect(),
    )))
}

/// Without query parameters every cell is returned with its registros;
/// with any filter only the matching cells, without registros.
#[utoipa::path(
    get,
    path = "/api/v1/celdas",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    params(CeldaQuery),
    responses(
        (status = 200, description = "Cell list", body = ApiResponse<Vec<CeldaDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_celdas(
    State(state): State<CeldaHandlerState>,
    ApiQuery(query): ApiQuery<CeldaQuery>,
) -> Result<Json<ApiResponse<Vec<CeldaDto>>>, ApiError<Vec<CeldaDto>>> {
    let filter = CeldaFilter::from(query);

    let celdas = if filter.is_empty() {
        state
            .service
            .list_all()
            .await
            .map_err(domain_error)?
            .into_iter()
            .map(CeldaDto::with_registros)
            .collect()
    } else {
        state
            .service
            .list_by_filters(filter)
            .await
            .map_err(domain_error)?
            .into_iter()
            .map(CeldaDto::from)
            .collect()
    };

    Ok(Json(ApiResponse::success(celdas)))
}

#[utoipa::path(
    get,
    path = "/api/v1/celdas/disponibilidad",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    params(DisponibilidadQuery),
    responses(
        (status = 200, description = "Available cells for a vehicle type", body = ApiResponse<DisponibilidadDto>),
        (status = 400, description = "id_tipo_vehiculo missing")
    )
)]
pub async fn disponibilidad(
    State(state): State<CeldaHandlerState>,
    ApiQuery(query): ApiQuery<DisponibilidadQuery>,
) -> Result<Json<ApiResponse<DisponibilidadDto>>, ApiError<DisponibilidadDto>> {
    let Some(id_tipo_vehiculo) = query.id_tipo_vehiculo else {
        return Err(bad_request("id_tipo_vehiculo is required"));
    };

    let celdas_disponibles = state
        .service
        .count_available_by_type(id_tipo_vehiculo)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(DisponibilidadDto {
        id_tipo_vehiculo,
        celdas_disponibles,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/celdas/exportar",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Snapshot of every cell", body = ApiResponse<CeldaExportDto>)
    )
)]
pub async fn exportar(
    State(state): State<CeldaHandlerState>,
) -> Result<Json<ApiResponse<CeldaExportDto>>, ApiError<CeldaExportDto>> {
    let export = state.service.export().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(CeldaExportDto::from(export))))
}

#[utoipa::path(
    get,
    path = "/api/v1/celdas/{id}",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Celda ID")),
    responses(
        (status = 200, description = "Cell details", body = ApiResponse<CeldaDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_celda(
    State(state): State<CeldaHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<CeldaDto>>, ApiError<CeldaDto>> {
    match state.service.get_by_id(id).await {
        Ok(Some(celda)) => Ok(Json(ApiResponse::success(CeldaDto::from(celda)))),
        Ok(None) => Err(celda_not_found(id)),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/celdas/{id}/historial",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Celda ID")),
    responses(
        (status = 200, description = "Maintenance transitions, newest first", body = ApiResponse<Vec<EstadoAuditDto>>),
        (status = 404, description = "Not found")
    )
)]
pub async fn historial(
    State(state): State<CeldaHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Vec<EstadoAuditDto>>>, ApiError<Vec<EstadoAuditDto>>> {
    let entries = state.service.status_history(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        entries.into_iter().map(EstadoAuditDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/celdas",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    request_body = CreateCeldaRequest,
    responses(
        (status = 201, description = "Cell created", body = ApiResponse<CeldaDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn create_celda(
    State(state): State<CeldaHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateCeldaRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CeldaDto>>), ApiError<CeldaDto>> {
    let celda = state
        .service
        .create(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(CeldaDto::from(celda))),
    ))
}

#[utoipa::path(
    put,
    path = "/api/v1/celdas/{id}",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Celda ID")),
    request_body = UpdateCeldaRequest,
    responses(
        (status = 200, description = "Cell updated", body = ApiResponse<CeldaDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Name already exists")
    )
)]
pub async fn update_celda(
    State(state): State<CeldaHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateCeldaRequest>,
) -> Result<Json<ApiResponse<CeldaDto>>, ApiError<CeldaDto>> {
    match state.service.update(id, request.into()).await {
        Ok(Some(celda)) => Ok(Json(ApiResponse::success(CeldaDto::from(celda)))),
        Ok(None) => Err(celda_not_found(id)),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/celdas/{id}/estado",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Celda ID")),
    request_body = UpdateEstadoRequest,
    responses(
        (status = 200, description = "Status updated", body = ApiResponse<CeldaDto>),
        (status = 400, description = "id_estado outside 1..=3"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_estado(
    State(state): State<CeldaHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateEstadoRequest>,
) -> Result<Json<ApiResponse<CeldaDto>>, ApiError<CeldaDto>> {
    let celda = state
        .service
        .update_status(id, request.id_estado)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(CeldaDto::from(celda))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/celdas/{id}",
    tag = "Celdas",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Celda ID")),
    responses(
        (status = 204, description = "Cell deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_celda(
    State(state): State<CeldaHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError<()>> {
    match state.service.delete(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(celda_not_found(id)),
        Err(e) => Err(domain_error(e)),
    }
}
