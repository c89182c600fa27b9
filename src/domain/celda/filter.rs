//! Typed filter for cell queries
//!
//! Every supplied field narrows the result (AND); an empty filter matches all
//! cells. Storage adapters translate it into their own predicate language.

use super::model::{Celda, EstadoCelda};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CeldaFilter {
    pub id_tipo_vehiculo: Option<i32>,
    pub id_estado: Option<i32>,
}

impl CeldaFilter {
    pub fn new(id_tipo_vehiculo: Option<i32>, id_estado: Option<i32>) -> Self {
        Self {
            id_tipo_vehiculo,
            id_estado,
        }
    }

    pub fn by_estado(estado: EstadoCelda) -> Self {
        Self {
            id_tipo_vehiculo: None,
            id_estado: Some(estado.id()),
        }
    }

    /// Available cells of one vehicle type.
    pub fn available_of_type(id_tipo_vehiculo: i32) -> Self {
        Self {
            id_tipo_vehiculo: Some(id_tipo_vehiculo),
            id_estado: Some(EstadoCelda::Disponible.id()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id_tipo_vehiculo.is_none() && self.id_estado.is_none()
    }

    pub fn matches(&self, celda: &Celda) -> bool {
        self.id_tipo_vehiculo
            .map_or(true, |tipo| celda.id_tipo_vehiculo == tipo)
            && self.id_estado.map_or(true, |estado| celda.id_estado == estado)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn celda(id_tipo_vehiculo: i32, id_estado: i32) -> Celda {
        Celda {
            id: 1,
            nombre_celda: "A1".into(),
            id_tipo_vehiculo,
            id_estado,
            registros: Vec::new(),
        }
    }

    #[test]
    fn empty_filter_matches_everything() {
        let filter = CeldaFilter::default();
        assert!(filter.is_empty());
        assert!(filter.matches(&celda(1, 1)));
        assert!(filter.matches(&celda(9, 3)));
    }

    #[test]
    fn filters_combine_with_and() {
        let filter = CeldaFilter::new(Some(2), Some(1));
        assert!(filter.matches(&celda(2, 1)));
        assert!(!filter.matches(&celda(2, 2)));
        assert!(!filter.matches(&celda(1, 1)));
    }

    #[test]
    fn single_filter_ignores_other_field() {
        let filter = CeldaFilter::new(Some(2), None);
        assert!(filter.matches(&celda(2, 1)));
        assert!(filter.matches(&celda(2, 3)));
        assert!(!filter.matches(&celda(1, 1)));
    }

    #[test]
    fn available_of_type_pins_disponible() {
        let filter = CeldaFilter::available_of_type(4);
        assert_eq!(filter.id_tipo_vehiculo, Some(4));
        assert_eq!(filter.id_estado, Some(EstadoCelda::Disponible.id()));
    }
}
