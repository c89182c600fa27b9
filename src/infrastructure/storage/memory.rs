//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::celda::{
    Celda, CeldaAuditRepository, CeldaFilter, CeldaRepository, CeldaStatusAudit, NewCelda,
    Registro, StatusChange,
};
use crate::domain::repositories::RepositoryProvider;
use crate::domain::usuario::{
    Credenciales, Rol, Usuario, UsuarioPatch, UsuarioRecord, UsuarioRepository,
    ROL_ADMINISTRADOR, ROL_OPERADOR,
};
use crate::domain::{DomainError, DomainResult};

fn next_id(counter: &AtomicI32) -> i32 {
    counter.fetch_add(1, Ordering::SeqCst)
}

// ── Celdas ──────────────────────────────────────────────────────

#[derive(Clone)]
struct StoredCelda {
    nombre_celda: String,
    id_tipo_vehiculo: i32,
    id_estado: i32,
}

/// Cells keyed by id plus a name index that enforces uniqueness.
pub struct InMemoryCeldaRepository {
    celdas: DashMap<i32, StoredCelda>,
    names: DashMap<String, i32>,
    registros: Arc<DashMap<i32, Registro>>,
    audit: Arc<InMemoryCeldaAuditRepository>,
    counter: AtomicI32,
}

impl InMemoryCeldaRepository {
    fn new(
        registros: Arc<DashMap<i32, Registro>>,
        audit: Arc<InMemoryCeldaAuditRepository>,
    ) -> Self {
        Self {
            celdas: DashMap::new(),
            names: DashMap::new(),
            registros,
            audit,
            counter: AtomicI32::new(1),
        }
    }

    fn to_celda(&self, id: i32, stored: &StoredCelda, with_registros: bool) -> Celda {
        let mut registros = Vec::new();
        if with_registros {
            registros = self
                .registros
                .iter()
                .filter(|r| r.id_celda == Some(id))
                .map(|r| r.value().clone())
                .collect();
            registros.sort_by_key(|r| r.id);
        }

        Celda {
            id,
            nombre_celda: stored.nombre_celda.clone(),
            id_tipo_vehiculo: stored.id_tipo_vehiculo,
            id_estado: stored.id_estado,
            registros,
        }
    }

    fn collect(&self, filter: &CeldaFilter, with_registros: bool) -> Vec<Celda> {
        let mut celdas: Vec<Celda> = self
            .celdas
            .iter()
            .map(|entry| self.to_celda(*entry.key(), entry.value(), with_registros))
            .filter(|c| filter.matches(c))
            .collect();
        celdas.sort_by_key(|c| c.id);
        celdas
    }
}

#[async_trait]
impl CeldaRepository for InMemoryCeldaRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Celda>> {
        Ok(self
            .celdas
            .get(&id)
            .map(|stored| self.to_celda(id, stored.value(), false)))
    }

    async fn find_all_with_registros(&self) -> DomainResult<Vec<Celda>> {
        Ok(self.collect(&CeldaFilter::default(), true))
    }

    async fn find_by_filter(&self, filter: &CeldaFilter) -> DomainResult<Vec<Celda>> {
        Ok(self.collect(filter, false))
    }

    async fn count_by_filter(&self, filter: &CeldaFilter) -> DomainResult<u64> {
        Ok(self.collect(filter, false).len() as u64)
    }

    async fn insert(&self, nueva: NewCelda) -> DomainResult<Celda> {
        let stored = StoredCelda {
            nombre_celda: nueva.nombre_celda.clone(),
            id_tipo_vehiculo: nueva.id_tipo_vehiculo,
            id_estado: nueva.estado_inicial(),
        };

        match self.names.entry(nueva.nombre_celda.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateName(nueva.nombre_celda)),
            Entry::Vacant(slot) => {
                let id = next_id(&self.counter);
                slot.insert(id);
                self.celdas.insert(id, stored.clone());
                Ok(self.to_celda(id, &stored, false))
            }
        }
    }

    async fn update_audited(
        &self,
        celda: Celda,
        audit: Option<StatusChange>,
    ) -> DomainResult<(Celda, Option<CeldaStatusAudit>)> {
        // The row guard is held until every write lands, so a concurrent
        // delete either wins outright or waits for this update.
        let mut stored = self
            .celdas
            .get_mut(&celda.id)
            .ok_or_else(|| DomainError::not_found("Celda", celda.id))?;

        if stored.nombre_celda != celda.nombre_celda {
            match self.names.entry(celda.nombre_celda.clone()) {
                Entry::Occupied(_) => {
                    return Err(DomainError::DuplicateName(celda.nombre_celda));
                }
                Entry::Vacant(slot) => {
                    slot.insert(celda.id);
                }
            }
            self.names.remove(&stored.nombre_celda);
        }

        let entry = audit.map(|change| self.audit.append(change));
        *stored = StoredCelda {
            nombre_celda: celda.nombre_celda,
            id_tipo_vehiculo: celda.id_tipo_vehiculo,
            id_estado: celda.id_estado,
        };
        Ok((self.to_celda(celda.id, &stored, false), entry))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let Some((_, removed)) = self.celdas.remove(&id) else {
            return Ok(false);
        };
        self.names.remove(&removed.nombre_celda);

        for mut registro in self.registros.iter_mut() {
            if registro.id_celda == Some(id) {
                registro.id_celda = None;
            }
        }
        Ok(true)
    }
}

pub struct InMemoryCeldaAuditRepository {
    entries: DashMap<i32, CeldaStatusAudit>,
    counter: AtomicI32,
}

impl Default for InMemoryCeldaAuditRepository {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
            counter: AtomicI32::new(1),
        }
    }
}

impl InMemoryCeldaAuditRepository {
    fn append(&self, change: StatusChange) -> CeldaStatusAudit {
        let entry = CeldaStatusAudit {
            id: next_id(&self.counter),
            id_celda: change.id_celda,
            estado_anterior: change.estado_anterior,
            estado_nuevo: change.estado_nuevo,
            registrado_en: change.registrado_en,
        };
        self.entries.insert(entry.id, entry.clone());
        entry
    }
}

#[async_trait]
impl CeldaAuditRepository for InMemoryCeldaAuditRepository {

    async fn find_by_celda(&self, id_celda: i32) -> DomainResult<Vec<CeldaStatusAudit>> {
        let mut entries: Vec<CeldaStatusAudit> = self
            .entries
            .iter()
            .filter(|e| e.id_celda == id_celda)
            .map(|e| e.value().clone())
            .collect();
        entries.sort_by(|a, b| {
            b.registrado_en
                .cmp(&a.registrado_en)
                .then_with(|| b.id.cmp(&a.id))
        });
        Ok(entries)
    }
}

// ── Usuarios ────────────────────────────────────────────────────

#[derive(Clone)]
struct StoredUsuario {
    nombre: String,
    email: String,
    contrasena_hash: String,
    id_rol: i32,
}

/// Users keyed by id plus an email index that enforces uniqueness.
pub struct InMemoryUsuarioRepository {
    usuarios: DashMap<i32, StoredUsuario>,
    emails: DashMap<String, i32>,
    roles: DashMap<i32, String>,
    counter: AtomicI32,
}

impl Default for InMemoryUsuarioRepository {
    fn default() -> Self {
        let roles = DashMap::new();
        roles.insert(ROL_ADMINISTRADOR, "Administrador".to_string());
        roles.insert(ROL_OPERADOR, "Operador".to_string());

        Self {
            usuarios: DashMap::new(),
            emails: DashMap::new(),
            roles,
            counter: AtomicI32::new(1),
        }
    }
}

impl InMemoryUsuarioRepository {
    fn to_usuario(&self, id: i32, stored: &StoredUsuario) -> Usuario {
        Usuario {
            id,
            nombre: stored.nombre.clone(),
            email: stored.email.clone(),
            id_rol: stored.id_rol,
            rol: self.roles.get(&stored.id_rol).map(|nombre| Rol {
                id: stored.id_rol,
                nombre: nombre.clone(),
            }),
        }
    }

    fn ensure_rol(&self, id_rol: i32) -> DomainResult<()> {
        if self.roles.contains_key(&id_rol) {
            Ok(())
        } else {
            Err(DomainError::Validation(format!("Rol {} does not exist", id_rol)))
        }
    }
}

#[async_trait]
impl UsuarioRepository for InMemoryUsuarioRepository {
    async fn insert(&self, record: UsuarioRecord) -> DomainResult<Usuario> {
        self.ensure_rol(record.id_rol)?;

        match self.emails.entry(record.email.clone()) {
            Entry::Occupied(_) => Err(DomainError::DuplicateEmail(record.email)),
            Entry::Vacant(slot) => {
                let id = next_id(&self.counter);
                slot.insert(id);
                let stored = StoredUsuario {
                    nombre: record.nombre,
                    email: record.email,
                    contrasena_hash: record.contrasena_hash,
                    id_rol: record.id_rol,
                };
                self.usuarios.insert(id, stored.clone());
                Ok(self.to_usuario(id, &stored))
            }
        }
    }

    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Usuario>> {
        Ok(self.usuarios.get(&id).map(|s| self.to_usuario(id, s.value())))
    }

    async fn find_all(&self) -> DomainResult<Vec<Usuario>> {
        let mut usuarios: Vec<Usuario> = self
            .usuarios
            .iter()
            .map(|entry| self.to_usuario(*entry.key(), entry.value()))
            .collect();
        usuarios.sort_by_key(|u| u.id);
        Ok(usuarios)
    }

    async fn find_credentials_by_email(&self, email: &str) -> DomainResult<Option<Credenciales>> {
        let Some(id) = self.emails.get(email).map(|id| *id) else {
            return Ok(None);
        };
        Ok(self.usuarios.get(&id).map(|stored| Credenciales {
            usuario: self.to_usuario(id, stored.value()),
            contrasena_hash: stored.contrasena_hash.clone(),
        }))
    }

    async fn count(&self) -> DomainResult<u64> {
        Ok(self.usuarios.len() as u64)
    }

    async fn update(&self, id: i32, patch: UsuarioPatch) -> DomainResult<Option<Usuario>> {
        let Some(mut stored) = self.usuarios.get(&id).map(|s| s.value().clone()) else {
            return Ok(None);
        };

        if let Some(id_rol) = patch.id_rol {
            self.ensure_rol(id_rol)?;
            stored.id_rol = id_rol;
        }

        if let Some(email) = patch.email {
            if email != stored.email {
                match self.emails.entry(email.clone()) {
                    Entry::Occupied(_) => return Err(DomainError::DuplicateEmail(email)),
                    Entry::Vacant(slot) => {
                        slot.insert(id);
                    }
                }
                self.emails.remove(&stored.email);
                stored.email = email;
            }
        }
        if let Some(nombre) = patch.nombre {
            stored.nombre = nombre;
        }
        if let Some(hash) = patch.contrasena_hash {
            stored.contrasena_hash = hash;
        }

        self.usuarios.insert(id, stored.clone());
        Ok(Some(self.to_usuario(id, &stored)))
    }

    async fn delete(&self, id: i32) -> DomainResult<bool> {
        let Some((_, removed)) = self.usuarios.remove(&id) else {
            return Ok(false);
        };
        self.emails.remove(&removed.email);
        Ok(true)
    }
}

// ── Provider ────────────────────────────────────────────────────

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    celdas: InMemoryCeldaRepository,
    celda_audit: Arc<InMemoryCeldaAuditRepository>,
    usuarios: InMemoryUsuarioRepository,
    registros: Arc<DashMap<i32, Registro>>,
    registro_counter: AtomicI32,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        let registros = Arc::new(DashMap::new());
        let celda_audit = Arc::new(InMemoryCeldaAuditRepository::default());
        Self {
            celdas: InMemoryCeldaRepository::new(registros.clone(), celda_audit.clone()),
            celda_audit,
            usuarios: InMemoryUsuarioRepository::default(),
            registros,
            registro_counter: AtomicI32::new(1),
        }
    }

    /// Record a vehicle entry against a cell. Registros are otherwise
    /// read-only, so this exists for seeding.
    pub fn add_registro(&self, id_celda: i32, placa: &str) -> Registro {
        let registro = Registro {
            id: next_id(&self.registro_counter),
            id_celda: Some(id_celda),
            placa: placa.to_string(),
            fecha_entrada: Utc::now(),
            fecha_salida: None,
        };
        self.registros.insert(registro.id, registro.clone());
        registro
    }

    /// Snapshot of every stored registro, orphans included.
    pub fn registros(&self) -> Vec<Registro> {
        let mut all: Vec<Registro> = self.registros.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|r| r.id);
        all
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn celdas(&self) -> &dyn CeldaRepository {
        &self.celdas
    }

    fn celda_audit(&self) -> &dyn CeldaAuditRepository {
        self.celda_audit.as_ref()
    }

    fn usuarios(&self) -> &dyn UsuarioRepository {
        &self.usuarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nueva(nombre: &str, tipo: i32, estado: i32) -> NewCelda {
        NewCelda {
            nombre_celda: nombre.into(),
            id_tipo_vehiculo: tipo,
            id_estado: Some(estado),
        }
    }

    #[tokio::test]
    async fn concurrent_inserts_of_same_name_yield_one_winner() {
        let store = Arc::new(InMemoryRepositoryProvider::new());

        let mut handles = Vec::new();
        for _ in 0..16 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store.celdas().insert(nueva("A1", 1, 1)).await
            }));
        }

        let mut created = 0;
        let mut duplicates = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => created += 1,
                Err(DomainError::DuplicateName(_)) => duplicates += 1,
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(created, 1);
        assert_eq!(duplicates, 15);
        assert_eq!(
            store
                .celdas()
                .count_by_filter(&CeldaFilter::default())
                .await
                .unwrap(),
            1
        );
    }

    #[tokio::test]
    async fn rename_frees_old_name() {
        let store = InMemoryRepositoryProvider::new();
        let mut a1 = store.celdas().insert(nueva("A1", 1, 1)).await.unwrap();

        a1.nombre_celda = "A2".into();
        store.celdas().update_audited(a1, None).await.unwrap();

        assert!(store.celdas().insert(nueva("A1", 1, 1)).await.is_ok());
        assert!(matches!(
            store.celdas().insert(nueva("A2", 1, 1)).await,
            Err(DomainError::DuplicateName(_))
        ));
    }

    #[tokio::test]
    async fn update_after_delete_does_not_resurrect() {
        let store = InMemoryRepositoryProvider::new();
        let mut a1 = store.celdas().insert(nueva("A1", 1, 1)).await.unwrap();
        assert!(store.celdas().delete(a1.id).await.unwrap());

        a1.nombre_celda = "A2".into();
        let err = store
            .celdas()
            .update_audited(a1.clone(), None)
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));

        assert!(store.celdas().find_by_id(a1.id).await.unwrap().is_none());
        assert!(store.celdas().insert(nueva("A2", 1, 1)).await.is_ok());
    }

    #[tokio::test]
    async fn audited_update_writes_status_and_entry() {
        let store = InMemoryRepositoryProvider::new();
        let mut a1 = store.celdas().insert(nueva("A1", 1, 1)).await.unwrap();
        a1.id_estado = 3;
        let change = StatusChange {
            id_celda: a1.id,
            estado_anterior: 1,
            estado_nuevo: 3,
            registrado_en: Utc::now(),
        };

        let (saved, entry) = store
            .celdas()
            .update_audited(a1.clone(), Some(change))
            .await
            .unwrap();
        assert_eq!(saved.id_estado, 3);
        assert_eq!(entry.map(|e| e.estado_nuevo), Some(3));

        let history = store.celda_audit().find_by_celda(a1.id).await.unwrap();
        assert_eq!(history.len(), 1);
    }

    #[tokio::test]
    async fn delete_orphans_registros() {
        let store = InMemoryRepositoryProvider::new();
        let a1 = store.celdas().insert(nueva("A1", 1, 2)).await.unwrap();
        store.add_registro(a1.id, "ABC123");

        let listed = store.celdas().find_all_with_registros().await.unwrap();
        assert_eq!(listed[0].registros.len(), 1);

        assert!(store.celdas().delete(a1.id).await.unwrap());
        let registros = store.registros();
        assert_eq!(registros.len(), 1);
        assert_eq!(registros[0].id_celda, None);
    }

    #[tokio::test]
    async fn usuario_email_and_role_are_checked() {
        let store = InMemoryRepositoryProvider::new();
        let record = |email: &str, id_rol| UsuarioRecord {
            nombre: "Ana".into(),
            email: email.into(),
            contrasena_hash: "hash".into(),
            id_rol,
        };

        let ana = store
            .usuarios()
            .insert(record("ana@parking.local", ROL_OPERADOR))
            .await
            .unwrap();
        assert_eq!(ana.rol.map(|r| r.nombre).as_deref(), Some("Operador"));

        assert!(matches!(
            store.usuarios().insert(record("ana@parking.local", ROL_OPERADOR)).await,
            Err(DomainError::DuplicateEmail(_))
        ));
        assert!(matches!(
            store.usuarios().insert(record("leo@parking.local", 42)).await,
            Err(DomainError::Validation(_))
        ));
    }
}
