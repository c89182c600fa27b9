//! Celda (parking cell) domain entity

use chrono::{DateTime, Utc};

/// Operational status of a parking cell.
///
/// Stored as an integer tag (`id_estado`); values outside the known range are
/// carried through untouched, see [`Celda::estado`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EstadoCelda {
    #[default]
    Disponible,
    Ocupada,
    Mantenimiento,
}

impl EstadoCelda {
    pub const fn id(self) -> i32 {
        match self {
            Self::Disponible => 1,
            Self::Ocupada => 2,
            Self::Mantenimiento => 3,
        }
    }

    pub fn from_id(id: i32) -> Option<Self> {
        match id {
            1 => Some(Self::Disponible),
            2 => Some(Self::Ocupada),
            3 => Some(Self::Mantenimiento),
            _ => None,
        }
    }
}

impl std::fmt::Display for EstadoCelda {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Disponible => write!(f, "Disponible"),
            Self::Ocupada => write!(f, "Ocupada"),
            Self::Mantenimiento => write!(f, "Mantenimiento"),
        }
    }
}

/// Historical usage record of a cell. Read-only here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registro {
    pub id: i32,
    /// `None` once the cell it belonged to has been deleted
    pub id_celda: Option<i32>,
    pub placa: String,
    pub fecha_entrada: DateTime<Utc>,
    pub fecha_salida: Option<DateTime<Utc>>,
}

/// Parking cell entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Celda {
    /// Assigned by storage
    pub id: i32,
    /// Unique across all cells (case-sensitive)
    pub nombre_celda: String,
    pub id_tipo_vehiculo: i32,
    pub id_estado: i32,
    /// Only populated by queries that load the relation
    pub registros: Vec<Registro>,
}

impl Celda {
    /// Known status, or `None` for an out-of-range tag.
    pub fn estado(&self) -> Option<EstadoCelda> {
        EstadoCelda::from_id(self.id_estado)
    }

    pub fn is_available(&self) -> bool {
        self.estado() == Some(EstadoCelda::Disponible)
    }

    /// Merge the supplied fields onto this cell. A supplied status goes
    /// through [`Celda::change_status`], so the returned change has to be
    /// audited exactly like one made through a status update.
    pub fn apply(&mut self, changes: CeldaChanges) -> Option<StatusChange> {
        if let Some(nombre) = changes.nombre_celda {
            self.nombre_celda = nombre;
        }
        if let Some(tipo) = changes.id_tipo_vehiculo {
            self.id_tipo_vehiculo = tipo;
        }
        changes.id_estado.and_then(|estado| self.change_status(estado))
    }

    /// Set a new status and return the change when it has to be audited.
    pub fn change_status(&mut self, nuevo: i32) -> Option<StatusChange> {
        let anterior = self.id_estado;
        self.id_estado = nuevo;

        touches_mantenimiento(anterior, nuevo).then(|| StatusChange {
            id_celda: self.id,
            estado_anterior: anterior,
            estado_nuevo: nuevo,
            registrado_en: Utc::now(),
        })
    }
}

/// True when a transition enters or leaves Mantenimiento.
pub fn touches_mantenimiento(anterior: i32, nuevo: i32) -> bool {
    let mantenimiento = EstadoCelda::Mantenimiento.id();
    anterior != nuevo && (anterior == mantenimiento || nuevo == mantenimiento)
}

/// Input for creating a cell
#[derive(Debug, Clone)]
pub struct NewCelda {
    pub nombre_celda: String,
    pub id_tipo_vehiculo: i32,
    pub id_estado: Option<i32>,
}

impl NewCelda {
    /// Status a new cell starts in; Disponible when none was given.
    pub fn estado_inicial(&self) -> i32 {
        self.id_estado
            .unwrap_or_else(|| EstadoCelda::default().id())
    }
}

/// Partial update of a cell; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct CeldaChanges {
    pub nombre_celda: Option<String>,
    pub id_tipo_vehiculo: Option<i32>,
    pub id_estado: Option<i32>,
}

/// A status transition that entered or left Mantenimiento
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub id_celda: i32,
    pub estado_anterior: i32,
    pub estado_nuevo: i32,
    pub registrado_en: DateTime<Utc>,
}

/// Persisted audit entry for a [`StatusChange`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CeldaStatusAudit {
    pub id: i32,
    pub id_celda: i32,
    pub estado_anterior: i32,
    pub estado_nuevo: i32,
    pub registrado_en: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn celda(id_estado: i32) -> Celda {
        Celda {
            id: 7,
            nombre_celda: "A1".into(),
            id_tipo_vehiculo: 1,
            id_estado,
            registros: Vec::new(),
        }
    }

    #[test]
    fn estado_ids_round_trip() {
        for estado in [
            EstadoCelda::Disponible,
            EstadoCelda::Ocupada,
            EstadoCelda::Mantenimiento,
        ] {
            assert_eq!(EstadoCelda::from_id(estado.id()), Some(estado));
        }
        assert_eq!(EstadoCelda::from_id(0), None);
        assert_eq!(EstadoCelda::from_id(4), None);
    }

    #[test]
    fn entering_maintenance_is_audited() {
        let mut c = celda(1);
        let change = c.change_status(3).expect("audited");
        assert_eq!(change.id_celda, 7);
        assert_eq!(change.estado_anterior, 1);
        assert_eq!(change.estado_nuevo, 3);
        assert_eq!(c.id_estado, 3);
    }

    #[test]
    fn leaving_maintenance_is_audited() {
        let mut c = celda(3);
        assert!(c.change_status(2).is_some());
    }

    #[test]
    fn ordinary_transitions_are_not_audited() {
        let mut c = celda(2);
        assert!(c.change_status(1).is_none());
        assert_eq!(c.id_estado, 1);
        assert!(c.change_status(2).is_none());
    }

    #[test]
    fn staying_in_maintenance_is_not_audited() {
        let mut c = celda(3);
        assert!(c.change_status(3).is_none());
    }

    #[test]
    fn out_of_range_status_is_tolerated() {
        let mut c = celda(1);
        assert!(c.change_status(99).is_none());
        assert_eq!(c.id_estado, 99);
        assert_eq!(c.estado(), None);
        assert!(!c.is_available());
    }

    #[test]
    fn apply_merges_only_supplied_fields() {
        let mut c = celda(1);
        let change = c.apply(CeldaChanges {
            id_tipo_vehiculo: Some(2),
            ..Default::default()
        });
        assert!(change.is_none());
        assert_eq!(c.nombre_celda, "A1");
        assert_eq!(c.id_tipo_vehiculo, 2);
        assert_eq!(c.id_estado, 1);
    }

    #[test]
    fn apply_into_maintenance_is_audited() {
        let mut c = celda(1);
        let change = c
            .apply(CeldaChanges {
                nombre_celda: Some("A9".into()),
                id_estado: Some(3),
                ..Default::default()
            })
            .expect("audited");
        assert_eq!(change.estado_anterior, 1);
        assert_eq!(change.estado_nuevo, 3);
        assert_eq!(c.nombre_celda, "A9");
        assert_eq!(c.id_estado, 3);
    }

    #[test]
    fn new_celda_defaults_to_disponible() {
        let nueva = NewCelda {
            nombre_celda: "B2".into(),
            id_tipo_vehiculo: 1,
            id_estado: None,
        };
        assert_eq!(nueva.estado_inicial(), EstadoCelda::Disponible.id());
    }
}
