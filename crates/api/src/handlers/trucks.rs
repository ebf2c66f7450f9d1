//! Truck reference handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{double_option, validate_plate};
use crate::AppState;
use expedlog_common::{
    db::{models::Truck, Repository},
    errors::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTruckRequest {
    #[validate(custom(function = validate_plate))]
    pub plate: String,

    #[serde(default)]
    pub brand: Option<String>,

    #[serde(default)]
    pub model: Option<String>,

    #[validate(range(min = 1950, max = 2100))]
    #[serde(default)]
    pub year: Option<i32>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTruckRequest {
    #[validate(custom(function = validate_plate))]
    pub plate: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub brand: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub model: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub year: Option<Option<i32>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TruckResponse {
    pub id: Uuid,
    pub plate: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Truck> for TruckResponse {
    fn from(truck: Truck) -> Self {
        Self {
            id: truck.id,
            plate: truck.plate,
            brand: truck.brand,
            model: truck.model,
            year: truck.year,
            created_at: truck.created_at.to_rfc3339(),
            updated_at: truck.updated_at.to_rfc3339(),
        }
    }
}

pub async fn list_trucks(State(state): State<AppState>) -> Result<Json<Vec<TruckResponse>>> {
    let repo = Repository::new(state.db.clone());
    let trucks = repo.list_trucks().await?;
    Ok(Json(trucks.into_iter().map(Into::into).collect()))
}

pub async fn get_truck(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TruckResponse>> {
    let repo = Repository::new(state.db.clone());

    let truck = repo.find_truck(id).await?.ok_or_else(|| AppError::NotFound {
        resource_type: "truck".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(truck.into()))
}

pub async fn create_truck(
    State(state): State<AppState>,
    Json(request): Json<CreateTruckRequest>,
) -> Result<(StatusCode, Json<TruckResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let truck = repo
        .create_truck(request.plate, request.brand, request.model, request.year)
        .await?;

    tracing::info!(truck_id = %truck.id, plate = %truck.plate, "Truck created");

    Ok((StatusCode::CREATED, Json(truck.into())))
}

pub async fn update_truck(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTruckRequest>,
) -> Result<Json<TruckResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let truck = repo
        .update_truck(id, request.plate, request.brand, request.model, request.year)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "truck".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(truck.into()))
}

pub async fn delete_truck(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_truck(id).await? {
        return Err(AppError::NotFound {
            resource_type: "truck".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
