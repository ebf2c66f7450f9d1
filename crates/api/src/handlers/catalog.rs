//! Product catalog handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use expedlog_common::{
    db::{models::CatalogItem, Repository},
    errors::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCatalogItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub code: String,

    #[validate(length(min = 1, max = 20))]
    pub unit: String,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCatalogItemRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub code: Option<String>,

    #[validate(length(min = 1, max = 20))]
    pub unit: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItemResponse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub unit: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CatalogItem> for CatalogItemResponse {
    fn from(item: CatalogItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            code: item.code,
            unit: item.unit,
            created_at: item.created_at.to_rfc3339(),
            updated_at: item.updated_at.to_rfc3339(),
        }
    }
}

pub async fn list_catalog_items(
    State(state): State<AppState>,
) -> Result<Json<Vec<CatalogItemResponse>>> {
    let repo = Repository::new(state.db.clone());
    let items = repo.list_catalog_items().await?;
    Ok(Json(items.into_iter().map(Into::into).collect()))
}

pub async fn get_catalog_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<CatalogItemResponse>> {
    let repo = Repository::new(state.db.clone());

    let item = repo
        .find_catalog_item(id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "catalogItem".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(item.into()))
}

pub async fn create_catalog_item(
    State(state): State<AppState>,
    Json(request): Json<CreateCatalogItemRequest>,
) -> Result<(StatusCode, Json<CatalogItemResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let item = repo
        .create_catalog_item(request.name, request.code, request.unit)
        .await?;

    tracing::info!(item_id = %item.id, code = %item.code, "Catalog item created");

    Ok((StatusCode::CREATED, Json(item.into())))
}

pub async fn update_catalog_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateCatalogItemRequest>,
) -> Result<Json<CatalogItemResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let item = repo
        .update_catalog_item(id, request.name, request.code, request.unit)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "catalogItem".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(item.into()))
}

pub async fn delete_catalog_item(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_catalog_item(id).await? {
        return Err(AppError::NotFound {
            resource_type: "catalogItem".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
