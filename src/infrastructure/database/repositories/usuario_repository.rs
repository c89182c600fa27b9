//! SeaORM implementation of UsuarioRepository

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::domain::usuario::{
    Credenciales, Rol, Usuario, UsuarioPatch, UsuarioRecord, UsuarioRepository,
};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{rol, usuario};

pub struct SeaOrmUsuarioRepository {
    db: DatabaseConnection,
}

impl SeaOrmUsuarioRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn load(&self, id: i32) -> DomainResult<Option<(usuario::Model, Option<rol::Model>)>> {
        usuario::Entity::find_by_id(id)
            .find_also_related(rol::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)
    }
}

fn usuario_from_model(model: usuario::Model, rol: Option<rol::Model>) -> Usuario {
    Usuario {
        id: model.id_usuario,
        nombre: model.nombre,
        email: model.email,
        id_rol: model.id_rol,
        rol: rol.map(|r| Rol {
            id: r.id_rol,
            nombre: r.nombre,
        }),
    }
}

fn db_err(e: DbErr) -> DomainError {
    DomainError::Storage(e.to_string())
}

fn write_err(e: DbErr, email: &str, id_rol: i32) -> DomainError {
    match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => DomainError::DuplicateEmail(email.to_string()),
        Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
            DomainError::Validation(format!("Rol {} does not exist", id_rol))
        }
        _ => db_err(e),
    }
}

#[async_trait]
impl UsuarioRepository for SeaOrmUsuarioRepository {
    async fn insert(&self, record: UsuarioRecord) -> DomainResult<Usuario> {
        let active = usuario::ActiveModel {
            id_usuario: NotSet,
            nombre: Set(record.nombre.clone()),
            email: Set(record.email.clone()),
            contrasena: Set(record.contrasena_hash),
            id_rol: Set(record.id_rol),
        };

        let model = active
            .insert(&self.db)
            .await
            .map_err(|e| write_err(e, &record.email, record.id_rol))?;

        let rol = rol::Entity::find_by_id(model.id_rol)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(usuario_from_model(model, rol))
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Usuario>> {
        Ok(self
            .load(id)
            .await?
            .map(|(model, rol)| usuario_from_model(model, rol)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Usuario>> {
        let rows = usuario::Entity::find()
            .find_also_related(rol::Entity)
            .order_by_asc(usuario::Column::IdUsuario)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, rol)| usuario_from_model(model, rol))
            .collect())
    }

    async fn find_credentials_by_email(&self, email: &str) -> DomainResult<Option<Credenciales>> {
        let row = usuario::Entity::find()
            .filter(usuario::Column::Email.eq(email))
            .find_also_related(rol::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        Ok(row.map(|(model, rol)| {
            let contrasena_hash = model.contrasena.clone();
            Credenciales {
                usuario: usuario_from_model(model, rol),
                contrasena_hash,
            }
        }))
    }

    async fn count(&self) -> DomainResult<u64> {
        usuario::Entity::find().count(&self.db).await.map_err(db_err)
    }

    async fn update(&self, id: i32, patch: UsuarioPatch) -> DomainResult<Option<Usuario>> {
        let Some((model, _)) = self.load(id).await? else {
            return Ok(None);
        };

        let email = patch.email.clone().unwrap_or_else(|| model.email.clone());
        let id_rol = patch.id_rol.unwrap_or(model.id_rol);

        let mut active: usuario::ActiveModel = model.into();
        if let Some(nombre) = patch.nombre {
            active.nombre = Set(nombre);
        }
        if let Some(new_email) = patch.email {
            active.email = Set(new_email);
        }
        if let Some(hash) = patch.contrasena_hash {
            active.contrasena = Set(hash);
        }
        if let Some(new_rol) = patch.id_rol {
            active.id_rol = Set(new_rol);
        }

        if active.is_changed() {
            active
                .update(&self.db)
                .await
                .map_err(|e| write_err(e, &email, id_rol))?;
        }

        self.find_by_id(id).await
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let result = usuario::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_err)?;
        Ok(result.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::usuario::{ROL_ADMINISTRADOR, ROL_OPERADOR};
    use crate::infrastructure::database::test_connection;

    fn record(email: &str, id_rol: i32) -> UsuarioRecord {
        UsuarioRecord {
            nombre: "Ana".into(),
            email: email.into(),
            contrasena_hash: "$2b$12$hash".into(),
            id_rol,
        }
    }

    #[tokio::test]
    async fn insert_loads_role_relation() {
        let repo = SeaOrmUsuarioRepository::new(test_connection().await);

        let ana = repo
            .insert(record("ana@parking.local", ROL_OPERADOR))
            .await
            .unwrap();

        assert!(ana.id > 0);
        let rol = ana.rol.expect("role loaded");
        assert_eq!(rol.id, ROL_OPERADOR);
        assert_eq!(rol.nombre, "Operador");
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = SeaOrmUsuarioRepository::new(test_connection().await);
        repo.insert(record("ana@parking.local", ROL_OPERADOR))
            .await
            .unwrap();

        let err = repo
            .insert(record("ana@parking.local", ROL_ADMINISTRADOR))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::DuplicateEmail(_)));
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn unknown_role_is_validation_error() {
        let repo = SeaOrmUsuarioRepository::new(test_connection().await);
        let err = repo
            .insert(record("ana@parking.local", 99))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[tokio::test]
    async fn credentials_expose_hash_by_email() {
        let repo = SeaOrmUsuarioRepository::new(test_connection().await);
        repo.insert(record("ana@parking.local", ROL_OPERADOR))
            .await
            .unwrap();

        let creds = repo
            .find_credentials_by_email("ana@parking.local")
            .await
            .unwrap()
            .expect("credentials");
        assert_eq!(creds.contrasena_hash, "$2b$12$hash");
        assert_eq!(creds.usuario.email, "ana@parking.local");

        assert!(repo
            .find_credentials_by_email("nadie@parking.local")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn update_merges_only_supplied_fields() {
        let repo = SeaOrmUsuarioRepository::new(test_connection().await);
        let ana = repo
            .insert(record("ana@parking.local", ROL_OPERADOR))
            .await
            .unwrap();

        let updated = repo
            .update(
                ana.id,
                UsuarioPatch {
                    nombre: Some("Ana María".into()),
                    id_rol: Some(ROL_ADMINISTRADOR),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("usuario exists");

        assert_eq!(updated.nombre, "Ana María");
        assert_eq!(updated.email, "ana@parking.local");
        assert!(updated.is_admin());
        assert_eq!(updated.rol.map(|r| r.nombre).as_deref(), Some("Administrador"));

        assert!(repo
            .update(999, UsuarioPatch::default())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn delete_reports_whether_row_existed() {
        let repo = SeaOrmUsuarioRepository::new(test_connection().await);
        let ana = repo
            .insert(record("ana@parking.local", ROL_OPERADOR))
            .await
            .unwrap();

        assert!(repo.delete(ana.id).await.unwrap());
        assert!(!repo.delete(ana.id).await.unwrap());
        assert!(repo.find_all().await.unwrap().is_empty());
    }
}
