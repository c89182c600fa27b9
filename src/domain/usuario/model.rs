//! Usuario domain entity

/// Well-known role ids seeded by the migrations
pub const ROL_ADMINISTRADOR: i32 = 1;
pub const ROL_OPERADOR: i32 = 2;

/// User role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rol {
    pub id: i32,
    pub nombre: String,
}

/// User model. The password hash is deliberately absent; see [`Credenciales`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Usuario {
    pub id: i32,
    pub nombre: String,
    pub email: String,
    pub id_rol: i32,
    /// Populated by reads that load the role relation
    pub rol: Option<Rol>,
}

impl Usuario {
    pub fn is_admin(&self) -> bool {
        self.id_rol == ROL_ADMINISTRADOR
    }
}

/// Stored login material for one user
#[derive(Debug, Clone)]
pub struct Credenciales {
    pub usuario: Usuario,
    pub contrasena_hash: String,
}

/// Registration input with a plaintext password
#[derive(Debug, Clone)]
pub struct NewUsuario {
    pub nombre: String,
    pub email: String,
    pub password: String,
    pub id_rol: i32,
}

/// Partial update with a plaintext password; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UsuarioChanges {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub id_rol: Option<i32>,
}

/// What the repository persists on insert: the password is already hashed.
#[derive(Debug, Clone)]
pub struct UsuarioRecord {
    pub nombre: String,
    pub email: String,
    pub contrasena_hash: String,
    pub id_rol: i32,
}

/// What the repository merges on update: the password is already hashed.
#[derive(Debug, Clone, Default)]
pub struct UsuarioPatch {
    pub nombre: Option<String>,
    pub email: Option<String>,
    pub contrasena_hash: Option<String>,
    pub id_rol: Option<i32>,
}
