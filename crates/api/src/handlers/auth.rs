//! Registration and login handlers

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use expedlog_common::{
    auth::{hash_password, verify_password},
    db::{NewUser, Repository},
    errors::{AppError, Result},
};
use expedlog_common::db::models::UserRole;

/// Registration request; `role` carries the label the frontend displays
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 50))]
    pub username: String,

    #[validate(email)]
    pub email: String,

    #[validate(length(min = 8, max = 128))]
    pub password: String,

    pub role: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,

    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let role = UserRole::from_frontend_label(&request.role).ok_or_else(|| {
        AppError::InvalidFormat {
            message: format!("Unknown role: {}", request.role),
        }
    })?;

    let repo = Repository::new(state.db.clone());

    if repo.find_user_by_email(&request.email).await?.is_some() {
        return Err(AppError::DuplicateEmail {
            email: request.email,
        });
    }

    let password_hash = hash_password(&request.password)?;

    let user = repo
        .create_user(NewUser {
            username: request.username,
            email: request.email,
            password_hash,
            role,
        })
        .await?;

    tracing::info!(
        user_id = %user.id,
        role = %user.role,
        "User registered"
    );

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        }),
    ))
}

/// Verify credentials and issue a bearer token
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());

    let user = repo
        .find_user_by_email(&request.email)
        .await?
        .ok_or_else(|| AppError::Unauthorized {
            message: "Invalid credentials".to_string(),
        })?;

    if !verify_password(&request.password, &user.password_hash)? {
        return Err(AppError::Unauthorized {
            message: "Invalid credentials".to_string(),
        });
    }

    let token = state
        .jwt
        .generate_token(user.id, &user.username, &user.email, user.user_role())?;

    tracing::info!(user_id = %user.id, "User logged in");

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.config.auth.jwt_expiration_secs,
        user: UserResponse {
            id: user.id,
            username: user.username,
            email: user.email,
            role: user.role,
        },
    }))
}
