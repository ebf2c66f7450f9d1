//! Expedition aggregate handlers
//!
//! The aggregate travels as one JSON document: expedition scalars, a products
//! array, a nested quality-control object and a nested rejection object. The
//! rejection object is always present in responses; its fields are all null
//! until a rejection workflow has been initiated.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::{double_option, empty_date_as_none, validate_plate};
use crate::AppState;
use expedlog_common::{
    auth::CurrentUser,
    db::{
        models::{ApprovalStatus, ExpeditionStatus, ProductCondition},
        ExpeditionAggregate, ExpeditionFilter, NewExpedition, NewProduct, NewQualityControl,
        NewRejection, QualityControlPatch, RejectionPatch, Repository, UpdateExpedition,
    },
    errors::{AppError, Result},
};

// ============================================================================
// Request DTOs
// ============================================================================

/// Query-string filters for listing expeditions
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpeditionQuery {
    pub expedition_number: Option<String>,
    pub truck_plate: Option<String>,
    pub driver_name: Option<String>,
    pub supplier_name: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpeditionQuery {
    fn into_filter(self) -> Result<ExpeditionFilter> {
        let status = match self.status.as_deref() {
            None => None,
            Some(s) => Some(ExpeditionStatus::parse(s).ok_or_else(|| {
                AppError::InvalidFormat {
                    message: format!("Unknown status: {}", s),
                }
            })?),
        };

        Ok(ExpeditionFilter {
            expedition_number: self.expedition_number,
            truck_plate: self.truck_plate,
            driver_name: self.driver_name,
            supplier_name: self.supplier_name,
            status,
            start_date: self.start_date,
            end_date: self.end_date,
        })
    }
}

/// Date-range filters for the stats endpoint
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    #[validate(length(min = 1, max = 200))]
    pub name: String,

    #[validate(length(min = 1, max = 50))]
    pub code: String,

    pub quantity: Decimal,

    #[validate(length(min = 1, max = 20))]
    pub unit: String,

    #[serde(default)]
    pub batch: Option<String>,

    #[serde(default, deserialize_with = "empty_date_as_none")]
    pub expires_at: Option<NaiveDate>,

    /// Condition of the received item (`novo`, `usado`, `danificado`, `a_verificar`)
    #[serde(rename = "status")]
    pub condition: ProductCondition,

    #[serde(default)]
    pub observations: Option<String>,
}

impl From<ProductInput> for NewProduct {
    fn from(input: ProductInput) -> Self {
        NewProduct {
            name: input.name,
            code: input.code,
            quantity: input.quantity,
            unit: input.unit,
            batch: input.batch,
            expires_at: input.expires_at,
            condition: input.condition,
            observations: input.observations,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QualityControlInput {
    #[validate(length(min = 1, max = 200))]
    pub responsible_name: String,

    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,

    pub approval_status: ApprovalStatus,

    #[serde(default)]
    pub justification: Option<String>,

    #[serde(default)]
    pub signature_token: Option<String>,

    #[serde(default)]
    pub observations: Option<String>,
}

impl From<QualityControlInput> for NewQualityControl {
    fn from(input: QualityControlInput) -> Self {
        NewQualityControl {
            responsible_name: input.responsible_name,
            analyzed_at: input.analyzed_at.map(Into::into),
            approval_status: input.approval_status,
            justification: input.justification,
            signature_token: input.signature_token,
            observations: input.observations,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectionInput {
    #[validate(length(min = 1, max = 1000))]
    pub reason: String,

    #[serde(default)]
    pub forwarded_to_supplies: bool,

    #[serde(default)]
    pub forwarded_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub forwarded_by: Option<String>,

    #[serde(default)]
    pub cargo_retained: bool,

    #[serde(default)]
    pub retained_quantity: Option<Decimal>,

    #[serde(default)]
    pub retention_location: Option<String>,

    #[serde(default)]
    pub corrective_actions: Option<String>,
}

impl From<RejectionInput> for NewRejection {
    fn from(input: RejectionInput) -> Self {
        NewRejection {
            reason: input.reason,
            forwarded_to_supplies: input.forwarded_to_supplies,
            forwarded_at: input.forwarded_at.map(Into::into),
            forwarded_by: input.forwarded_by,
            cargo_retained: input.cargo_retained,
            retained_quantity: input.retained_quantity,
            retention_location: input.retention_location,
            corrective_actions: input.corrective_actions,
        }
    }
}

/// Request to create the full aggregate
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpeditionRequest {
    #[validate(length(min = 1, max = 50))]
    pub expedition_number: String,

    pub dispatched_at: DateTime<Utc>,

    #[serde(default)]
    pub status: Option<ExpeditionStatus>,

    #[validate(custom(function = validate_plate))]
    pub truck_plate: String,

    #[validate(length(min = 1, max = 200))]
    pub driver_name: String,

    #[validate(length(min = 1, max = 50))]
    pub driver_document: String,

    #[serde(default)]
    pub transport_company: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub supplier_name: String,

    #[validate(length(min = 1, max = 50))]
    pub supplier_document: String,

    #[validate(length(min = 1, max = 200))]
    pub responsible_name: String,

    #[serde(default)]
    pub responsible_position: Option<String>,

    #[serde(default)]
    pub observations: Option<String>,

    #[serde(default)]
    pub arrived_at: Option<DateTime<Utc>>,

    #[serde(default)]
    #[validate(nested)]
    pub products: Vec<ProductInput>,

    #[validate(nested)]
    pub quality_control: QualityControlInput,

    #[serde(default)]
    #[validate(nested)]
    pub rejection: Option<RejectionInput>,
}

/// Partial update; only fields present in the body are written.
///
/// Nullable columns take an explicit `null` to clear; absent fields are skipped.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpeditionRequest {
    #[validate(length(min = 1, max = 50))]
    pub expedition_number: Option<String>,

    pub dispatched_at: Option<DateTime<Utc>>,

    pub status: Option<ExpeditionStatus>,

    #[validate(custom(function = validate_plate))]
    pub truck_plate: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub driver_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub driver_document: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub transport_company: Option<Option<String>>,

    #[validate(length(min = 1, max = 200))]
    pub supplier_name: Option<String>,

    #[validate(length(min = 1, max = 50))]
    pub supplier_document: Option<String>,

    #[validate(length(min = 1, max = 200))]
    pub responsible_name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub responsible_position: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub observations: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub arrived_at: Option<Option<DateTime<Utc>>>,

    /// Full replacement of the products collection
    #[validate(nested)]
    pub products: Option<Vec<ProductInput>>,

    #[validate(nested)]
    pub quality_control: Option<QualityControlPatchInput>,

    #[validate(nested)]
    pub rejection: Option<RejectionPatchInput>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct QualityControlPatchInput {
    #[validate(length(min = 1, max = 200))]
    pub responsible_name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    pub analyzed_at: Option<Option<DateTime<Utc>>>,

    pub approval_status: Option<ApprovalStatus>,

    #[serde(default, deserialize_with = "double_option")]
    pub justification: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub signature_token: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub observations: Option<Option<String>>,
}

impl From<QualityControlPatchInput> for QualityControlPatch {
    fn from(input: QualityControlPatchInput) -> Self {
        QualityControlPatch {
            responsible_name: input.responsible_name,
            analyzed_at: input.analyzed_at.map(|o| o.map(Into::into)),
            approval_status: input.approval_status,
            justification: input.justification,
            signature_token: input.signature_token,
            observations: input.observations,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RejectionPatchInput {
    #[validate(length(min = 1, max = 1000))]
    pub reason: Option<String>,

    pub forwarded_to_supplies: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub forwarded_at: Option<Option<DateTime<Utc>>>,

    #[serde(default, deserialize_with = "double_option")]
    pub forwarded_by: Option<Option<String>>,

    pub cargo_retained: Option<bool>,

    #[serde(default, deserialize_with = "double_option")]
    pub retained_quantity: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    pub retention_location: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    pub corrective_actions: Option<Option<String>>,
}

impl From<RejectionPatchInput> for RejectionPatch {
    fn from(input: RejectionPatchInput) -> Self {
        RejectionPatch {
            reason: input.reason,
            forwarded_to_supplies: input.forwarded_to_supplies,
            forwarded_at: input.forwarded_at.map(|o| o.map(Into::into)),
            forwarded_by: input.forwarded_by,
            cargo_retained: input.cargo_retained,
            retained_quantity: input.retained_quantity,
            retention_location: input.retention_location,
            corrective_actions: input.corrective_actions,
        }
    }
}

// ============================================================================
// Response DTOs
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub quantity: Decimal,
    pub unit: String,
    pub batch: Option<String>,
    pub expires_at: Option<NaiveDate>,
    #[serde(rename = "status")]
    pub condition: String,
    pub observations: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QualityControlResponse {
    pub id: Uuid,
    pub responsible_name: String,
    pub analyzed_at: Option<String>,
    pub approval_status: String,
    pub justification: Option<String>,
    pub signature_token: Option<String>,
    pub observations: Option<String>,
}

/// Always present in the aggregate; all fields null until a rejection exists
#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectionResponse {
    pub id: Option<Uuid>,
    pub reason: Option<String>,
    pub forwarded_to_supplies: Option<bool>,
    pub forwarded_at: Option<String>,
    pub forwarded_by: Option<String>,
    pub cargo_retained: Option<bool>,
    pub retained_quantity: Option<Decimal>,
    pub retention_location: Option<String>,
    pub corrective_actions: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpeditionResponse {
    pub id: Uuid,
    pub expedition_number: String,
    pub dispatched_at: String,
    pub status: String,
    pub truck_plate: String,
    pub driver_name: String,
    pub driver_document: String,
    pub transport_company: Option<String>,
    pub supplier_name: String,
    pub supplier_document: String,
    pub responsible_name: String,
    pub responsible_position: Option<String>,
    pub observations: Option<String>,
    pub arrived_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub created_by: String,
    pub updated_by: Option<String>,
    pub products: Vec<ProductResponse>,
    pub quality_control: Option<QualityControlResponse>,
    pub rejection: RejectionResponse,
}

impl From<ExpeditionAggregate> for ExpeditionResponse {
    fn from(aggregate: ExpeditionAggregate) -> Self {
        let expedition = aggregate.expedition;

        let products = aggregate
            .products
            .into_iter()
            .map(|p| ProductResponse {
                id: p.id,
                name: p.name,
                code: p.code,
                quantity: p.quantity,
                unit: p.unit,
                batch: p.batch,
                expires_at: p.expires_at,
                condition: p.condition,
                observations: p.observations,
            })
            .collect();

        let quality_control = aggregate.quality_control.map(|qc| QualityControlResponse {
            id: qc.id,
            responsible_name: qc.responsible_name,
            analyzed_at: qc.analyzed_at.map(|dt| dt.to_rfc3339()),
            approval_status: qc.approval_status,
            justification: qc.justification,
            signature_token: qc.signature_token,
            observations: qc.observations,
        });

        let rejection = match aggregate.rejection {
            Some(r) => RejectionResponse {
                id: Some(r.id),
                reason: Some(r.reason),
                forwarded_to_supplies: Some(r.forwarded_to_supplies),
                forwarded_at: r.forwarded_at.map(|dt| dt.to_rfc3339()),
                forwarded_by: r.forwarded_by,
                cargo_retained: Some(r.cargo_retained),
                retained_quantity: r.retained_quantity,
                retention_location: r.retention_location,
                corrective_actions: r.corrective_actions,
            },
            None => RejectionResponse::default(),
        };

        ExpeditionResponse {
            id: expedition.id,
            expedition_number: expedition.expedition_number,
            dispatched_at: expedition.dispatched_at.to_rfc3339(),
            status: expedition.status,
            truck_plate: expedition.truck_plate,
            driver_name: expedition.driver_name,
            driver_document: expedition.driver_document,
            transport_company: expedition.transport_company,
            supplier_name: expedition.supplier_name,
            supplier_document: expedition.supplier_document,
            responsible_name: expedition.responsible_name,
            responsible_position: expedition.responsible_position,
            observations: expedition.observations,
            arrived_at: expedition.arrived_at.map(|dt| dt.to_rfc3339()),
            created_at: expedition.created_at.to_rfc3339(),
            updated_at: expedition.updated_at.to_rfc3339(),
            created_by: expedition.created_by,
            updated_by: expedition.updated_by,
            products,
            quality_control,
            rejection,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsResponse {
    pub total: i64,
    pub pendente: i64,
    pub em_analise: i64,
    pub aprovado: i64,
    pub rejeitado: i64,
    pub retido: i64,
}

// ============================================================================
// Handlers
// ============================================================================

/// List expeditions with optional filters
pub async fn list_expeditions(
    State(state): State<AppState>,
    Query(query): Query<ExpeditionQuery>,
) -> Result<Json<Vec<ExpeditionResponse>>> {
    let filter = query.into_filter()?;

    let repo = Repository::new(state.db.clone());
    let aggregates = repo.list_expeditions(&filter).await?;

    Ok(Json(aggregates.into_iter().map(Into::into).collect()))
}

/// Expedition counts grouped by status
pub async fn expedition_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<StatsResponse>> {
    let filter = ExpeditionFilter {
        start_date: query.start_date,
        end_date: query.end_date,
        ..Default::default()
    };

    let repo = Repository::new(state.db.clone());
    let counts = repo.status_counts(&filter).await?;

    Ok(Json(StatsResponse {
        total: counts.total,
        pendente: counts.pending,
        em_analise: counts.in_analysis,
        aprovado: counts.approved,
        rejeitado: counts.rejected,
        retido: counts.retained,
    }))
}

/// Get one aggregate by id
pub async fn get_expedition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ExpeditionResponse>> {
    let repo = Repository::new(state.db.clone());

    let aggregate = repo
        .get_expedition(id)
        .await?
        .ok_or_else(|| AppError::ExpeditionNotFound { id: id.to_string() })?;

    Ok(Json(aggregate.into()))
}

/// Create the full aggregate
pub async fn create_expedition(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(request): Json<CreateExpeditionRequest>,
) -> Result<(StatusCode, Json<ExpeditionResponse>)> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());

    let new = NewExpedition {
        expedition_number: request.expedition_number,
        dispatched_at: request.dispatched_at.into(),
        status: request.status.unwrap_or(ExpeditionStatus::Pending),
        truck_plate: request.truck_plate,
        driver_name: request.driver_name,
        driver_document: request.driver_document,
        transport_company: request.transport_company,
        supplier_name: request.supplier_name,
        supplier_document: request.supplier_document,
        responsible_name: request.responsible_name,
        responsible_position: request.responsible_position,
        observations: request.observations,
        arrived_at: request.arrived_at.map(Into::into),
        created_by: user.username.clone(),
        products: request.products.into_iter().map(Into::into).collect(),
        quality_control: request.quality_control.into(),
        rejection: request.rejection.map(Into::into),
    };

    let aggregate = repo.create_expedition(new).await?;

    tracing::info!(
        expedition_id = %aggregate.expedition.id,
        expedition_number = %aggregate.expedition.expedition_number,
        created_by = %user.username,
        "Expedition created"
    );

    Ok((StatusCode::CREATED, Json(aggregate.into())))
}

/// Apply a partial update to the aggregate
pub async fn update_expedition(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateExpeditionRequest>,
) -> Result<Json<ExpeditionResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());

    let patch = UpdateExpedition {
        expedition_number: request.expedition_number,
        dispatched_at: request.dispatched_at.map(Into::into),
        status: request.status,
        truck_plate: request.truck_plate,
        driver_name: request.driver_name,
        driver_document: request.driver_document,
        transport_company: request.transport_company,
        supplier_name: request.supplier_name,
        supplier_document: request.supplier_document,
        responsible_name: request.responsible_name,
        responsible_position: request.responsible_position,
        observations: request.observations,
        arrived_at: request.arrived_at.map(|o| o.map(Into::into)),
        updated_by: Some(user.username.clone()),
        products: request
            .products
            .map(|list| list.into_iter().map(Into::into).collect()),
        quality_control: request.quality_control.map(Into::into),
        rejection: request.rejection.map(Into::into),
    };

    let aggregate = repo
        .update_expedition(id, patch)
        .await?
        .ok_or_else(|| AppError::ExpeditionNotFound { id: id.to_string() })?;

    tracing::info!(
        expedition_id = %id,
        updated_by = %user.username,
        "Expedition updated"
    );

    Ok(Json(aggregate.into()))
}

/// Delete the aggregate
pub async fn delete_expedition(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    let repo = Repository::new(state.db.clone());

    if !repo.delete_expedition(id).await? {
        return Err(AppError::ExpeditionNotFound { id: id.to_string() });
    }

    tracing::info!(expedition_id = %id, "Expedition deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// Standalone quality-control sub-update
pub async fn update_quality_control(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<QualityControlPatchInput>,
) -> Result<Json<ExpeditionResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());

    let aggregate = repo
        .update_quality_control(id, request.into())
        .await?
        .ok_or_else(|| AppError::ExpeditionNotFound { id: id.to_string() })?;

    tracing::info!(expedition_id = %id, "Quality control updated");

    Ok(Json(aggregate.into()))
}

/// Standalone rejection sub-update
pub async fn update_rejection(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<RejectionPatchInput>,
) -> Result<Json<ExpeditionResponse>> {
    request.validate().map_err(AppError::from_validation)?;

    let repo = Repository::new(state.db.clone());

    let aggregate = repo
        .update_rejection(id, request.into())
        .await?
        .ok_or_else(|| AppError::ExpeditionNotFound { id: id.to_string() })?;

    tracing::info!(expedition_id = %id, "Rejection updated");

    Ok(Json(aggregate.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_request_parses_example_payload() {
        let body = r#"{
            "expeditionNumber": "EXP-1",
            "dispatchedAt": "2025-06-01T08:30:00Z",
            "status": "pendente",
            "truckPlate": "ABC1D23",
            "driverName": "Carlos Silva",
            "driverDocument": "12345678900",
            "supplierName": "Acme Ltda",
            "supplierDocument": "11222333000144",
            "responsibleName": "Beatriz Costa",
            "products": [
                {"name": "Widget", "code": "W1", "quantity": 10, "unit": "UN", "status": "novo"}
            ],
            "qualityControl": {"responsibleName": "Ana", "approvalStatus": "pendente"}
        }"#;

        let request: CreateExpeditionRequest = serde_json::from_str(body).unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.status, Some(ExpeditionStatus::Pending));
        assert_eq!(request.products.len(), 1);
        assert_eq!(request.products[0].condition, ProductCondition::New);
        assert_eq!(
            request.quality_control.approval_status,
            ApprovalStatus::Pending
        );
        assert!(request.rejection.is_none());
    }

    #[test]
    fn test_update_request_field_presence() {
        // Absent nullable field is skipped; explicit null clears it
        let body = r#"{"observations": null, "driverName": "Novo Motorista"}"#;
        let request: UpdateExpeditionRequest = serde_json::from_str(body).unwrap();

        assert_eq!(request.observations, Some(None));
        assert_eq!(request.driver_name.as_deref(), Some("Novo Motorista"));
        assert_eq!(request.transport_company, None);
        assert!(request.products.is_none());
    }

    #[test]
    fn test_update_request_products_replacement_list() {
        let body = r#"{"products": []}"#;
        let request: UpdateExpeditionRequest = serde_json::from_str(body).unwrap();

        // An empty list is a replacement with nothing, not an absent field
        assert_eq!(request.products.map(|p| p.len()), Some(0));
    }

    #[test]
    fn test_quality_control_patch_outcome() {
        let body = r#"{"approvalStatus": "aprovado", "analyzedAt": "2025-06-02T10:00:00Z"}"#;
        let request: QualityControlPatchInput = serde_json::from_str(body).unwrap();

        assert_eq!(request.approval_status, Some(ApprovalStatus::Approved));
        let patch: QualityControlPatch = request.into();
        assert_eq!(
            ExpeditionStatus::apply_quality_outcome(patch.approval_status.unwrap()),
            Some(ExpeditionStatus::Approved)
        );
    }

    #[test]
    fn test_rejection_patch_retention() {
        let body = r#"{"cargoRetained": true, "retainedQuantity": 5}"#;
        let request: RejectionPatchInput = serde_json::from_str(body).unwrap();

        let patch: RejectionPatch = request.into();
        assert_eq!(patch.cargo_retained, Some(true));
        assert_eq!(
            ExpeditionStatus::apply_retention(patch.cargo_retained.unwrap()),
            Some(ExpeditionStatus::Retained)
        );
    }

    #[test]
    fn test_unknown_status_filter_rejected() {
        let query = ExpeditionQuery {
            status: Some("despachado".to_string()),
            ..Default::default()
        };
        assert!(query.into_filter().is_err());
    }

    #[test]
    fn test_status_filter_accepts_wire_values() {
        let query = ExpeditionQuery {
            status: Some("aprovado".to_string()),
            ..Default::default()
        };
        let filter = query.into_filter().unwrap();
        assert_eq!(filter.status, Some(ExpeditionStatus::Approved));
    }

    #[test]
    fn test_invalid_plate_fails_validation() {
        let body = r#"{
            "expeditionNumber": "EXP-2",
            "dispatchedAt": "2025-06-01T08:30:00Z",
            "truckPlate": "NOT-A-PLATE",
            "driverName": "Carlos Silva",
            "driverDocument": "12345678900",
            "supplierName": "Acme Ltda",
            "supplierDocument": "11222333000144",
            "responsibleName": "Beatriz Costa",
            "qualityControl": {"responsibleName": "Ana", "approvalStatus": "pendente"}
        }"#;

        let request: CreateExpeditionRequest = serde_json::from_str(body).unwrap();
        assert!(request.validate().is_err());
    }
}
