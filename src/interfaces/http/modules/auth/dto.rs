//! Authentication DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::usuario::ROL_OPERADOR;
use crate::domain::NewUsuario;
use crate::interfaces::http::common::non_blank;
use crate::interfaces::http::modules::usuarios::UsuarioDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub usuario: UsuarioDto,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(custom(function = "non_blank"))]
    pub nombre: String,
    #[validate(contains(pattern = "@", message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
    /// Defaults to Operador
    #[validate(range(min = 1, message = "id_rol must be a positive id"))]
    pub id_rol: Option<i32>,
}

impl From<RegisterRequest> for NewUsuario {
    fn from(req: RegisterRequest) -> Self {
        Self {
            nombre: req.nombre.trim().to_string(),
            email: req.email,
            password: req.password,
            id_rol: req.id_rol.unwrap_or(ROL_OPERADOR),
        }
    }
}
