//! User account persistence for authentication

use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use uuid::Uuid;

/// Input for registering a user
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    /// Already hashed; the repository never sees a plaintext password
    pub password_hash: String,
    pub role: UserRole,
}

impl Repository {
    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        UserEntity::find()
            .filter(UserColumn::Email.eq(email))
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_user_by_id(&self, id: Uuid) -> Result<Option<User>> {
        UserEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_user(&self, new: NewUser) -> Result<User> {
        UserActiveModel {
            id: Set(Uuid::new_v4()),
            username: Set(new.username),
            email: Set(new.email),
            password_hash: Set(new.password_hash),
            role: Set(new.role.as_str().to_string()),
            created_at: Set(Utc::now().into()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }
}
