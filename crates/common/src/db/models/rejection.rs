//! Rejection entity (0..1 per expedition, created once a rejection workflow starts)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rejections")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub expedition_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub reason: String,

    pub forwarded_to_supplies: bool,

    pub forwarded_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "Text", nullable)]
    pub forwarded_by: Option<String>,

    pub cargo_retained: bool,

    pub retained_quantity: Option<Decimal>,

    #[sea_orm(column_type = "Text", nullable)]
    pub retention_location: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub corrective_actions: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::expedition::Entity",
        from = "Column::ExpeditionId",
        to = "super::expedition::Column::Id",
        on_delete = "Cascade"
    )]
    Expedition,
}

impl Related<super::expedition::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expedition.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
