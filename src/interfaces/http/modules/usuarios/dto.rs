//! Usuario DTOs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{NewUsuario, Rol, Usuario, UsuarioChanges};
use crate::interfaces::http::common::non_blank;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUsuarioRequest {
    #[validate(custom(function = "non_blank"))]
    pub nombre: String,
    #[validate(contains(pattern = "@", message = "invalid email format"))]
    pub email: String,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: String,
    #[validate(range(min = 1, message = "id_rol must be a positive id"))]
    pub id_rol: i32,
}

impl From<CreateUsuarioRequest> for NewUsuario {
    fn from(req: CreateUsuarioRequest) -> Self {
        Self {
            nombre: req.nombre.trim().to_string(),
            email: req.email,
            password: req.password,
            id_rol: req.id_rol,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateUsuarioRequest {
    #[validate(custom(function = "non_blank"))]
    pub nombre: Option<String>,
    #[validate(contains(pattern = "@", message = "invalid email format"))]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128, message = "password must be 6–128 characters"))]
    pub password: Option<String>,
    #[validate(range(min = 1, message = "id_rol must be a positive id"))]
    pub id_rol: Option<i32>,
}

impl From<UpdateUsuarioRequest> for UsuarioChanges {
    fn from(req: UpdateUsuarioRequest) -> Self {
        Self {
            nombre: req.nombre,
            email: req.email,
            password: req.password,
            id_rol: req.id_rol,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RolDto {
    pub id: i32,
    pub nombre: String,
}

impl From<Rol> for RolDto {
    fn from(rol: Rol) -> Self {
        Self {
            id: rol.id,
            nombre: rol.nombre,
        }
    }
}

/// Usuario as returned by profile, list, get and update
#[derive(Debug, Serialize, ToSchema)]
pub struct UsuarioDto {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub id_rol: i32,
    pub rol: Option<RolDto>,
}

impl From<Usuario> for UsuarioDto {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nombre: u.nombre,
            email: u.email,
            id_rol: u.id_rol,
            rol: u.rol.map(RolDto::from),
        }
    }
}

/// Usuario as returned right after creation; `rol` is the role id
#[derive(Debug, Serialize, ToSchema)]
pub struct UsuarioCreadoDto {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub rol: i32,
}

impl From<Usuario> for UsuarioCreadoDto {
    fn from(u: Usuario) -> Self {
        Self {
            id: u.id,
            nombre: u.nombre,
            email: u.email,
            rol: u.id_rol,
        }
    }
}
