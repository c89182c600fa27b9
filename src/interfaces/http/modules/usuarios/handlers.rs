//! Usuario management API handlers
//!
//! Delegates to `UsuarioService` from the application/identity layer.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    Extension, Json,
};

use super::dto::{CreateUsuarioRequest, UpdateUsuarioRequest, UsuarioCreadoDto, UsuarioDto};
use crate::application::identity::UsuarioService;
use crate::interfaces::http::common::{
    domain_error, not_found, ApiError, ApiPath, ApiResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::AuthenticatedUser;

#[derive(Clone)]
pub struct UsuarioHandlerState {
    pub service: Arc<UsuarioService>,
}

#[utoipa::path(
    get,
    path = "/api/v1/usuarios/profile",
    tag = "Usuarios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profile of the authenticated usuario", body = ApiResponse<UsuarioDto>),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Usuario no longer exists")
    )
)]
pub async fn get_profile(
    State(state): State<UsuarioHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<UsuarioDto>>, ApiError<UsuarioDto>> {
    match state.service.get_profile(user.usuario_id).await {
        Ok(Some(usuario)) => Ok(Json(ApiResponse::success(UsuarioDto::from(usuario)))),
        Ok(None) => Err(not_found("Usuario no encontrado")),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/usuarios",
    tag = "Usuarios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All usuarios", body = ApiResponse<Vec<UsuarioDto>>),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn list_usuarios(
    State(state): State<UsuarioHandlerState>,
) -> Result<Json<ApiResponse<Vec<UsuarioDto>>>, ApiError<Vec<UsuarioDto>>> {
    let usuarios = state.service.list_all().await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(
        usuarios.into_iter().map(UsuarioDto::from).collect(),
    )))
}

#[utoipa::path(
    post,
    path = "/api/v1/usuarios",
    tag = "Usuarios",
    security(("bearer_auth" = [])),
    request_body = CreateUsuarioRequest,
    responses(
        (status = 201, description = "Usuario created", body = ApiResponse<UsuarioCreadoDto>),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn create_usuario(
    State(state): State<UsuarioHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUsuarioRequest>,
) -> Result<(StatusCode, Json<ApiResponse<UsuarioCreadoDto>>), ApiError<UsuarioCreadoDto>> {
    let usuario = state
        .service
        .create(request.into())
        .await
        .map_err(domain_error)?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(UsuarioCreadoDto::from(usuario))),
    ))
}

#[utoipa::path(
    get,
    path = "/api/v1/usuarios/{id}",
    tag = "Usuarios",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Usuario ID")),
    responses(
        (status = 200, description = "Usuario details", body = ApiResponse<UsuarioDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_usuario(
    State(state): State<UsuarioHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<Json<ApiResponse<UsuarioDto>>, ApiError<UsuarioDto>> {
    match state.service.get_by_id(id).await {
        Ok(Some(usuario)) => Ok(Json(ApiResponse::success(UsuarioDto::from(usuario)))),
        Ok(None) => Err(not_found(format!("Usuario {} no encontrado", id))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    put,
    path = "/api/v1/usuarios/{id}",
    tag = "Usuarios",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Usuario ID")),
    request_body = UpdateUsuarioRequest,
    responses(
        (status = 200, description = "Usuario updated", body = ApiResponse<UsuarioDto>),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Email already registered")
    )
)]
pub async fn update_usuario(
    State(state): State<UsuarioHandlerState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(request): ValidatedJson<UpdateUsuarioRequest>,
) -> Result<Json<ApiResponse<UsuarioDto>>, ApiError<UsuarioDto>> {
    match state.service.update(id, request.into()).await {
        Ok(Some(usuario)) => Ok(Json(ApiResponse::success(UsuarioDto::from(usuario)))),
        Ok(None) => Err(not_found(format!("Usuario {} no encontrado", id))),
        Err(e) => Err(domain_error(e)),
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/usuarios/{id}",
    tag = "Usuarios",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Usuario ID")),
    responses(
        (status = 204, description = "Usuario deleted"),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_usuario(
    State(state): State<UsuarioHandlerState>,
    ApiPath(id): ApiPath<i32>,
) -> Result<StatusCode, ApiError<()>> {
    match state.service.delete(id).await {
        Ok(true) => Ok(StatusCode::NO_CONTENT),
        Ok(false) => Err(not_found(format!("Usuario {} no encontrado", id))),
        Err(e) => Err(domain_error(e)),
    }
}
