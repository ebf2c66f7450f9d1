//! Quality-control entity (1:1 with expedition)

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Outcome of the quality analysis
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApprovalStatus {
    #[serde(rename = "aprovado")]
    Approved,
    #[serde(rename = "rejeitado")]
    Rejected,
    #[serde(rename = "pendente")]
    Pending,
}

impl ApprovalStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApprovalStatus::Approved => "aprovado",
            ApprovalStatus::Rejected => "rejeitado",
            ApprovalStatus::Pending => "pendente",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "aprovado" => Some(ApprovalStatus::Approved),
            "rejeitado" => Some(ApprovalStatus::Rejected),
            "pendente" => Some(ApprovalStatus::Pending),
            _ => None,
        }
    }
}

impl From<String> for ApprovalStatus {
    fn from(s: String) -> Self {
        ApprovalStatus::parse(&s).unwrap_or(ApprovalStatus::Pending)
    }
}

impl From<ApprovalStatus> for String {
    fn from(status: ApprovalStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "quality_control")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub expedition_id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub responsible_name: String,

    pub analyzed_at: Option<DateTimeWithTimeZone>,

    #[sea_orm(column_type = "Text")]
    pub approval_status: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub justification: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub signature_token: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub observations: Option<String>,
}

impl Model {
    /// Get the approval outcome as an enum
    pub fn outcome(&self) -> ApprovalStatus {
        ApprovalStatus::from(self.approval_status.clone())
    }
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
