//! Celda entity

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "celdas")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_celda: i32,

    #[sea_orm(unique)]
    pub nombre_celda: String,

    pub id_tipo_vehiculo: i32,

    /// 1 = Disponible, 2 = Ocupada, 3 = Mantenimiento
    pub id_estado: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::registro::Entity")]
    Registros,
}

impl Related<super::registro::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Registros.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
