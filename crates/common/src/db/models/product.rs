//! Product line-item entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Condition of a received product
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProductCondition {
    #[serde(rename = "novo")]
    New,
    #[serde(rename = "usado")]
    Used,
    #[serde(rename = "danificado")]
    Damaged,
    #[serde(rename = "a_verificar")]
    ToVerify,
}

impl ProductCondition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductCondition::New => "novo",
            ProductCondition::Used => "usado",
            ProductCondition::Damaged => "danificado",
            ProductCondition::ToVerify => "a_verificar",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "novo" => Some(ProductCondition::New),
            "usado" => Some(ProductCondition::Used),
            "danificado" => Some(ProductCondition::Damaged),
            "a_verificar" => Some(ProductCondition::ToVerify),
            _ => None,
        }
    }
}

impl From<String> for ProductCondition {
    fn from(s: String) -> Self {
        ProductCondition::parse(&s).unwrap_or(ProductCondition::ToVerify)
    }
}

impl From<ProductCondition> for String {
    fn from(condition: ProductCondition) -> Self {
        condition.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub expedition_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub name: String,

    #[sea_orm(column_type = "Text")]
    pub code: String,

    pub quantity: Decimal,

    #[sea_orm(column_type = "Text")]
    pub unit: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub batch: Option<String>,

    pub expires_at: Option<Date>,

    #[sea_orm(column_type = "Text")]
    pub condition: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub observations: Option<String>,
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
