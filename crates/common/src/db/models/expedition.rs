//! Expedition entity and lifecycle status

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::quality_control::ApprovalStatus;

/// Expedition lifecycle status
///
/// Wire values are the Portuguese labels the admin UI speaks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpeditionStatus {
    #[serde(rename = "pendente")]
    Pending,
    #[serde(rename = "em_analise")]
    InAnalysis,
    #[serde(rename = "aprovado")]
    Approved,
    #[serde(rename = "rejeitado")]
    Rejected,
    #[serde(rename = "retido")]
    Retained,
}

impl ExpeditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpeditionStatus::Pending => "pendente",
            ExpeditionStatus::InAnalysis => "em_analise",
            ExpeditionStatus::Approved => "aprovado",
            ExpeditionStatus::Rejected => "rejeitado",
            ExpeditionStatus::Retained => "retido",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "pendente" => Some(ExpeditionStatus::Pending),
            "em_analise" => Some(ExpeditionStatus::InAnalysis),
            "aprovado" => Some(ExpeditionStatus::Approved),
            "rejeitado" => Some(ExpeditionStatus::Rejected),
            "retido" => Some(ExpeditionStatus::Retained),
            _ => None,
        }
    }

    /// Status forced onto the expedition by a quality-control outcome.
    ///
    /// An `aprovado`/`rejeitado` outcome overwrites the expedition status with the
    /// matching value regardless of its current state; `pendente` leaves it untouched.
    pub fn apply_quality_outcome(outcome: ApprovalStatus) -> Option<ExpeditionStatus> {
        match outcome {
            ApprovalStatus::Approved => Some(ExpeditionStatus::Approved),
            ApprovalStatus::Rejected => Some(ExpeditionStatus::Rejected),
            ApprovalStatus::Pending => None,
        }
    }

    /// Status forced onto the expedition when cargo is retained.
    pub fn apply_retention(cargo_retained: bool) -> Option<ExpeditionStatus> {
        cargo_retained.then_some(ExpeditionStatus::Retained)
    }
}

impl From<String> for ExpeditionStatus {
    fn from(s: String) -> Self {
        ExpeditionStatus::parse(&s).unwrap_or(ExpeditionStatus::Pending)
    }
}

impl From<ExpeditionStatus> for String {
    fn from(status: ExpeditionStatus) -> Self {
        status.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expeditions")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Business-visible number, user-supplied; uniqueness not enforced here
    #[sea_orm(column_type = "Text")]
    pub expedition_number: String,

    pub dispatched_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "Text")]
    pub status: String,

    #[sea_orm(column_type = "Text")]
    pub truck_plate: String,

    #[sea_orm(column_type = "Text")]
    pub driver_name: String,

    #[sea_orm(column_type = "Text")]
    pub driver_document: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub transport_company: Option<String>,

    #[sea_orm(column_type = "Text")]
    pub supplier_name: String,

    #[sea_orm(column_type = "Text")]
    pub supplier_document: String,

    #[sea_orm(column_type = "Text")]
    pub responsible_name: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub responsible_position: Option<String>,

    #[sea_orm(column_type = "Text", nullable)]
    pub observations: Option<String>,

    pub arrived_at: Option<DateTimeWithTimeZone>,

    pub created_at: DateTimeWithTimeZone,

    pub updated_at: DateTimeWithTimeZone,

    #[sea_orm(column_type = "Text")]
    pub created_by: String,

    #[sea_orm(column_type = "Text", nullable)]
    pub updated_by: Option<String>,
}

impl Model {
    /// Get the lifecycle status as an enum
    pub fn expedition_status(&self) -> ExpeditionStatus {
        ExpeditionStatus::from(self.status.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::product::Entity")]
    Products,

    #[sea_orm(has_one = "super::quality_control::Entity")]
    QualityControl,

    #[sea_orm(has_one = "super::rejection::Entity")]
    Rejection,
}

impl Related<super::product::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::quality_control::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::QualityControl.def()
    }
}

impl Related<super::rejection::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rejection.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_string_roundtrip() {
        for status in [
            ExpeditionStatus::Pending,
            ExpeditionStatus::InAnalysis,
            ExpeditionStatus::Approved,
            ExpeditionStatus::Rejected,
            ExpeditionStatus::Retained,
        ] {
            assert_eq!(ExpeditionStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ExpeditionStatus::parse("unknown"), None);
    }

    #[test]
    fn test_quality_outcome_overwrites_status() {
        assert_eq!(
            ExpeditionStatus::apply_quality_outcome(ApprovalStatus::Approved),
            Some(ExpeditionStatus::Approved)
        );
        assert_eq!(
            ExpeditionStatus::apply_quality_outcome(ApprovalStatus::Rejected),
            Some(ExpeditionStatus::Rejected)
        );
    }

    #[test]
    fn test_pending_outcome_leaves_status_untouched() {
        assert_eq!(
            ExpeditionStatus::apply_quality_outcome(ApprovalStatus::Pending),
            None
        );
    }

    #[test]
    fn test_retention_forces_retained() {
        assert_eq!(
            ExpeditionStatus::apply_retention(true),
            Some(ExpeditionStatus::Retained)
        );
        assert_eq!(ExpeditionStatus::apply_retention(false), None);
    }
}
