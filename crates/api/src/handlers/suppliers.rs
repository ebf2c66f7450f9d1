//! Supplier reference handlers

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
    db::{models::Supplier, Repository},
    errors::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateSupplierRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub document: String,

    #[validate(email)]
    #[serde(default)]
    pub email: Option<String>,

    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSupplierRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub document: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierResponse {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Supplier> for SupplierResponse {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
            document: supplier.document,
            email: supplier.email,
            phone: supplier.phone,
            created_at: supplier.created_at.to_rfc3339(),
            updated_at: supplier.updated_at.to_rfc3339(),
        }
    }
}

pub async fn list_suppliers(State(state): State<AppState>) -> Result<Json<Vec<SupplierResponse>>> {
    let repo = Repository::new(state.db.clone());
    let suppliers = repo.list_suppliers().await?;
    Ok(Json(suppliers.into_iter().map(Into::into).collect()))
}

pub async fn get_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SupplierResponse>> {
    let repo = Repository::new(state.db.clone());

    let supplier = repo.find_supplier(id).await?.ok_or_else(|| AppError::NotFound {
        resource_type: "supplier".to_string(),
        id: id.to_string(),
    })?;

    Ok(Json(supplier.into()))
}

pub async fn create_supplier(
    State(state): State<AppState>,
    Json(request): Json<CreateSupplierRequest>,
) -> Result<(StatusCode, Json<SupplierResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let supplier = repo
        .create_supplier(request.name, request.document, request.email, request.phone)
        .await?;

    tracing::info!(supplier_id = %supplier.id, "Supplier created");

    Ok((StatusCode::CREATED, Json(supplier.into())))
}

pub async fn update_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateSupplierRequest>,
) -> Result<Json<SupplierResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let supplier = repo
        .update_supplier(id, request.name, request.document, request.email, request.phone)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "supplier".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(supplier.into()))
}

pub async fn delete_supplier(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_supplier(id).await? {
        return Err(AppError::NotFound {
            resource_type: "supplier".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
