//! Audit trail of cell status changes into or out of maintenance

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "celda_status_audit")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    /// No foreign key: entries outlive the cell they describe
    pub id_celda: i32,

    pub estado_anterior: i32,

    pub estado_nuevo: i32,

    pub registrado_en: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
