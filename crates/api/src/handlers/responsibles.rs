//! Expedition and quality responsible handlers
//!
//! Two registries with the same shape: who may sign off an expedition dispatch,
//! and who may sign off its quality analysis.

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
    db::{
        models::{ExpeditionResponsible, QualityResponsible},
        Repository,
    },
    errors::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateResponsibleRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[serde(default)]
    pub position: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponsibleRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub position: Option<Option<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsibleResponse {
    pub id: Uuid,
    pub name: String,
    pub position: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<ExpeditionResponsible> for ResponsibleResponse {
    fn from(responsible: ExpeditionResponsible) -> Self {
        Self {
            id: responsible.id,
            name: responsible.name,
            position: responsible.position,
            created_at: responsible.created_at.to_rfc3339(),
            updated_at: responsible.updated_at.to_rfc3339(),
        }
    }
}

impl From<QualityResponsible> for ResponsibleResponse {
    fn from(responsible: QualityResponsible) -> Self {
        Self {
            id: responsible.id,
            name: responsible.name,
            position: responsible.position,
            created_at: responsible.created_at.to_rfc3339(),
            updated_at: responsible.updated_at.to_rfc3339(),
        }
    }
}

// ============================================================================
// Expedition responsibles
// ============================================================================

pub async fn list_expedition_responsibles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResponsibleResponse>>> {
    let repo = Repository::new(state.db.clone());
    let responsibles = repo.list_expedition_responsibles().await?;
    Ok(Json(responsibles.into_iter().map(Into::into).collect()))
}

pub async fn get_expedition_responsible(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResponsibleResponse>> {
    let repo = Repository::new(state.db.clone());

    let responsible = repo
        .find_expedition_responsible(id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "expeditionResponsible".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(responsible.into()))
}

pub async fn create_expedition_responsible(
    State(state): State<AppState>,
    Json(request): Json<CreateResponsibleRequest>,
) -> Result<(StatusCode, Json<ResponsibleResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let responsible = repo
        .create_expedition_responsible(request.name, request.position)
        .await?;

    tracing::info!(responsible_id = %responsible.id, "Expedition responsible created");

    Ok((StatusCode::CREATED, Json(responsible.into())))
}

pub async fn update_expedition_responsible(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResponsibleRequest>,
) -> Result<Json<ResponsibleResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let responsible = repo
        .update_expedition_responsible(id, request.name, request.position)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "expeditionResponsible".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(responsible.into()))
}

pub async fn delete_expedition_responsible(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_expedition_responsible(id).await? {
        return Err(AppError::NotFound {
            resource_type: "expeditionResponsible".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Quality responsibles
// ============================================================================

pub async fn list_quality_responsibles(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResponsibleResponse>>> {
    let repo = Repository::new(state.db.clone());
    let responsibles = repo.list_quality_responsibles().await?;
    Ok(Json(responsibles.into_iter().map(Into::into).collect()))
}

pub async fn get_quality_responsible(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ResponsibleResponse>> {
    let repo = Repository::new(state.db.clone());

    let responsible = repo
        .find_quality_responsible(id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "qualityResponsible".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(responsible.into()))
}

pub async fn create_quality_responsible(
    State(state): State<AppState>,
    Json(request): Json<CreateResponsibleRequest>,
) -> Result<(StatusCode, Json<ResponsibleResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let responsible = repo
        .create_quality_responsible(request.name, request.position)
        .await?;

    tracing::info!(responsible_id = %responsible.id, "Quality responsible created");

    Ok((StatusCode::CREATED, Json(responsible.into())))
}

pub async fn update_quality_responsible(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateResponsibleRequest>,
) -> Result<Json<ResponsibleResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let responsible = repo
        .update_quality_responsible(id, request.name, request.position)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "qualityResponsible".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(responsible.into()))
}

pub async fn delete_quality_responsible(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_quality_responsible(id).await? {
        return Err(AppError::NotFound {
            resource_type: "qualityResponsible".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
