//! Transport company reference handlers

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
    db::{models::TransportCompany, Repository},
    errors::{AppError, Result},
};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTransportCompanyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub document: String,

    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransportCompanyRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub document: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub phone: Option<Option<String>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportCompanyResponse {
    pub id: Uuid,
    pub name: String,
    pub document: String,
    pub phone: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<TransportCompany> for TransportCompanyResponse {
    fn from(company: TransportCompany) -> Self {
        Self {
            id: company.id,
            name: company.name,
            document: company.document,
            phone: company.phone,
            created_at: company.created_at.to_rfc3339(),
            updated_at: company.updated_at.to_rfc3339(),
        }
    }
}

pub async fn list_transport_companies(
    State(state): State<AppState>,
) -> Result<Json<Vec<TransportCompanyResponse>>> {
    let repo = Repository::new(state.db.clone());
    let companies = repo.list_transport_companies().await?;
    Ok(Json(companies.into_iter().map(Into::into).collect()))
}

pub async fn get_transport_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TransportCompanyResponse>> {
    let repo = Repository::new(state.db.clone());

    let company = repo
        .find_transport_company(id)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "transportCompany".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(company.into()))
}

pub async fn create_transport_company(
    State(state): State<AppState>,
    Json(request): Json<CreateTransportCompanyRequest>,
) -> Result<(StatusCode, Json<TransportCompanyResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let company = repo
        .create_transport_company(request.name, request.document, request.phone)
        .await?;

    tracing::info!(company_id = %company.id, "Transport company created");

    Ok((StatusCode::CREATED, Json(company.into())))
}

pub async fn update_transport_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateTransportCompanyRequest>,
) -> Result<Json<TransportCompanyResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());
    let company = repo
        .update_transport_company(id, request.name, request.document, request.phone)
        .await?
        .ok_or_else(|| AppError::NotFound {
            resource_type: "transportCompany".to_string(),
            id: id.to_string(),
        })?;

    Ok(Json(company.into()))
}

pub async fn delete_transport_company(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_transport_company(id).await? {
        return Err(AppError::NotFound {
            resource_type: "transportCompany".to_string(),
            id: id.to_string(),
        });
    }

    Ok(StatusCode::NO_CONTENT)
}
