//! Driver reference handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::double_option;
use crate::AppState;
use expedlog_common::{
    db::{models::Driver, Repository},
    errors::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateDriverRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub document: String,

    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDriverRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub document: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DriverResponse {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Driver> for DriverResponse {
    fn from(driver: Driver) -> Self {
        Self {
            id: driver.id,
            name: driver.name,
            document: driver.document,
            phone: driver.phone,
            created_at: driver.created_at.to_rfc3339(),
            updated_at: driver.updated_at.to_rfc3339(),
        }
    }
}

pub async fn list_drivers(State(state): State<AppState>) -> Result<Json<Vec<DriverResponse>>> {
    let repo = Repository::new(state.db.clone());
    let drivers = repo.list_drivers().await?;
    Ok(Json(drivers.into_iter().map(Into::into).collect()))
}

pub async fn get_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<DriverResponse>> {
    let repo = Repository::new(state.db.clone());

    let driver = repo.find_driver(id).await?.ok_or_else(|| AppError::NotFound {
        resource_type: "driver".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(driver.into()))
}

pub async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<(StatusCode, Json<DriverResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let driver = repo
        .create_driver(request.name, request.document, request.phone)
        .await?;

    tracing::info!(driver_id = %driver.id, "Driver created");

    Ok((StatusCode::CREATED, Json(driver.into())))
}

pub async fn update_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateDriverRequest>,
) -> Result<Json<DriverResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let driver = repo
        .update_driver(id, request.name, request.document, request.phone)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "driver".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(driver.into()))
}

pub async fn delete_driver(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_driver(id).await? {
        return Err(AppError::NotFound {
            resource_type: "driver".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
