//! User account entity and roles

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Internal user role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "admin")]
    Admin,
    #[serde(rename = "expedicao")]
    Expedition,
    #[serde(rename = "qualidade")]
    Quality,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::Expedition => "expedicao",
            UserRole::Quality => "qualidade",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "admin" => Some(UserRole::Admin),
            "expedicao" => Some(UserRole::Expedition),
            "qualidade" => Some(UserRole::Quality),
            _ => None,
        }
    }

    /// Map the role label the frontend sends at registration to an internal role
    pub fn from_frontend_label(label: &str) -> Option<Self> {
        match label {
            "Administrador" | "admin" => Some(UserRole::Admin),
            "Expedição" | "Expedicao" | "expedicao" => Some(UserRole::Expedition),
            "Qualidade" | "qualidade" => Some(UserRole::Quality),
            _ => None,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::parse(&s).unwrap_or(UserRole::Expedition)
    }
}

impl From<UserRole> for String {
    fn from(role: UserRole) -> Self {
        role.as_str().to_string()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(column_type = "Text")]
    pub username: String,

    #[sea_orm(column_type = "Text", unique)]
    pub email: String,

    /// Argon2 hash, never the plaintext
    #[sea_orm(column_type = "Text")]
    pub password_hash: String,

    #[sea_orm(column_type = "Text")]
    pub role: String,

    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn user_role(&self) -> UserRole {
        UserRole::from(self.role.clone())
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontend_label_mapping() {
        assert_eq!(UserRole::from_frontend_label("Administrador"), Some(UserRole::Admin));
        assert_eq!(UserRole::from_frontend_label("Expedição"), Some(UserRole::Expedition));
        assert_eq!(UserRole::from_frontend_label("Qualidade"), Some(UserRole::Quality));
        assert_eq!(UserRole::from_frontend_label("Gerente"), None);
    }

    #[test]
    fn test_role_string_roundtrip() {
        for role in [UserRole::Admin, UserRole::Expedition, UserRole::Quality] {
            assert_eq!(UserRole::parse(role.as_str()), Some(role));
        }
    }
}
