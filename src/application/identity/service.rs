//! Usuario management service: application-layer orchestration
//!
//! All usuario-related business logic lives here.
//! HTTP handlers should be thin wrappers that delegate to this service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::AdminConfig;
use crate::domain::usuario::ROL_ADMINISTRADOR;
use crate::domain::{
    DomainError, DomainResult, NewUsuario, RepositoryProvider, Usuario, UsuarioChanges,
    UsuarioPatch, UsuarioRecord,
};
use crate::infrastructure::crypto::jwt::{create_token, JwtConfig};
use crate::infrastructure::crypto::password::{hash_password, verify_password};

/// Authentication result returned after a successful login
#[derive(Debug, Clone)]
pub struct AuthResult {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub usuario: Usuario,
}

/// Usuario service: orchestrates all identity / usuario-management use-cases.
///
/// Email uniqueness is left to storage; the password hash never leaves
/// this service except on its way into the repository.
pub struct UsuarioService {
    repos: Arc<dyn RepositoryProvider>,
    jwt_config: JwtConfig,
}

impl UsuarioService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, jwt_config: JwtConfig) -> Self {
        Self { repos, jwt_config }
    }

    pub fn jwt_config(&self) -> &JwtConfig {
        &self.jwt_config
    }

    // ── Authentication ──────────────────────────────────────────

    /// Authenticate by email + password and return a JWT.
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<AuthResult> {
        let Some(creds) = self.repos.usuarios().find_credentials_by_email(email).await? else {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        };

        let valid = verify_password(password, &creds.contrasena_hash).unwrap_or(false);
        if !valid {
            return Err(DomainError::Unauthorized("Invalid credentials".into()));
        }

        let usuario = creds.usuario;
        let token = create_token(usuario.id, &usuario.email, usuario.id_rol, &self.jwt_config)
            .map_err(|e| DomainError::Storage(format!("Failed to create token: {}", e)))?;

        info!(usuario_id = usuario.id, "Usuario logged in");
        Ok(AuthResult {
            token,
            token_type: "Bearer".into(),
            expires_in: self.jwt_config.expiration_hours * 3600,
            usuario,
        })
    }

    // ── Queries ─────────────────────────────────────────────────

    /// Profile of the authenticated usuario.
    pub async fn get_profile(&self, id: i32) -> DomainResult<Option<Usuario>> {
        self.get_by_id(id).await
    }

    pub async fn get_by_id(&self, id: i32) -> DomainResult<Option<Usuario>> {
        self.repos.usuarios().find_by_id(id).await
    }

    pub async fn list_all(&self) -> DomainResult<Vec<Usuario>> {
        self.repos.usuarios().find_all().await
    }

    // ── Commands (mutations) ────────────────────────────────────

    pub async fn create(&self, nuevo: NewUsuario) -> DomainResult<Usuario> {
        let record = UsuarioRecord {
            nombre: nuevo.nombre,
            email: nuevo.email,
            contrasena_hash: hash(&nuevo.password)?,
            id_rol: nuevo.id_rol,
        };

        let usuario = self.repos.usuarios().insert(record).await?;
        info!(usuario_id = usuario.id, email = %usuario.email, "Usuario created");
        Ok(usuario)
    }

    /// Merge `changes` onto an existing usuario; a new password is hashed.
    pub async fn update(&self, id: i32, changes: UsuarioChanges) -> DomainResult<Option<Usuario>> {
        let contrasena_hash = changes.password.as_deref().map(hash).transpose()?;
        let patch = UsuarioPatch {
            nombre: changes.nombre,
            email: changes.email,
            contrasena_hash,
            id_rol: changes.id_rol,
        };

        let updated = self.repos.usuarios().update(id, patch).await?;
        if updated.is_some() {
            info!(usuario_id = id, "Usuario updated");
        }
        Ok(updated)
    }

    pub async fn delete(&self, id: i32) -> DomainResult<bool> {
        let removed = self.repos.usuarios().delete(id).await?;
        if removed {
            info!(usuario_id = id, "Usuario deleted");
        }
        Ok(removed)
    }

    /// Create the configured administrator when no usuarios exist yet.
    /// Returns the created usuario, or `None` when seeding was skipped.
    pub async fn ensure_admin(&self, admin: &AdminConfig) -> DomainResult<Option<Usuario>> {
        if self.repos.usuarios().count().await? > 0 {
            return Ok(None);
        }

        info!("Creating default admin usuario...");
        let usuario = self
            .create(NewUsuario {
                nombre: admin.nombre.clone(),
                email: admin.email.clone(),
                password: admin.password.clone(),
                id_rol: ROL_ADMINISTRADOR,
            })
            .await?;

        warn!(email = %usuario.email, "Default admin created; change its password");
        Ok(Some(usuario))
    }
}

fn hash(password: &str) -> DomainResult<String> {
    hash_password(password)
        .map_err(|e| DomainError::Storage(format!("Failed to hash password: {}", e)))
}
