//! Registro entity (historical cell usage)

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "registros")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_registro: i32,

    /// Set to NULL when the cell is deleted
    #[sea_orm(nullable)]
    pub id_celda: Option<i32>,

    pub placa: String,

    pub fecha_entrada: DateTimeUtc,

    #[sea_orm(nullable)]
    pub fecha_salida: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::celda::Entity",
        from = "Column::IdCelda",
        to = "super::celda::Column::IdCelda",
        on_delete = "SetNull"
    )]
    Celda,
}

impl Related<super::celda::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Celda.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
