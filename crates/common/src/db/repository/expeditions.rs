//! Expedition aggregate persistence
//!
//! The expedition aggregate spans four tables (expeditions, products,
//! quality_control, rejections). Every multi-step write here runs inside a single
//! transaction: a failure at any statement rolls the whole operation back, so a
//! partial aggregate is never visible.
//!
//! Status transitions are a deliberate side effect of the two sub-record writes:
//! a quality-control outcome of `aprovado`/`rejeitado` overwrites the expedition
//! status, and `cargo_retained = true` forces `retido`. The transition rules live
//! on [`ExpeditionStatus`]; this module only invokes them.

use super::Repository;
use crate::db::models::*;
use crate::errors::{AppError, Result};
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbBackend, EntityTrait, QueryFilter,
    QueryOrder, Set, Statement, TransactionTrait,
};
use std::collections::HashMap;
use uuid::Uuid;

/// One expedition with its sub-records joined in
#[derive(Debug, Clone)]
pub struct ExpeditionAggregate {
    pub expedition: Expedition,
    /// Ordered by product id
    pub products: Vec<Product>,
    pub quality_control: Option<QualityControl>,
    /// `None` when no rejection workflow has been initiated
    pub rejection: Option<Rejection>,
}

/// Optional list filters; absent fields match everything
#[derive(Debug, Clone, Default)]
pub struct ExpeditionFilter {
    pub expedition_number: Option<String>,
    pub truck_plate: Option<String>,
    pub driver_name: Option<String>,
    pub supplier_name: Option<String>,
    pub status: Option<ExpeditionStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ExpeditionFilter {
    /// Inclusive lower bound: start of the start day
    pub fn start_bound(&self) -> Option<DateTime<Utc>> {
        self.start_date
            .map(|d| d.and_time(NaiveTime::MIN).and_utc())
    }

    /// Inclusive upper bound: last second of the end day
    pub fn end_bound(&self) -> Option<DateTime<Utc>> {
        self.end_date.map(|d| {
            let end_of_day = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
            d.and_time(end_of_day).and_utc()
        })
    }
}

/// Expedition counts grouped by lifecycle status
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub total: i64,
    pub pending: i64,
    pub in_analysis: i64,
    pub approved: i64,
    pub rejected: i64,
    pub retained: i64,
}

/// Input for creating the full aggregate
#[derive(Debug, Clone)]
pub struct NewExpedition {
    pub expedition_number: String,
    pub dispatched_at: DateTime<FixedOffset>,
    pub status: ExpeditionStatus,
    pub truck_plate: String,
    pub driver_name: String,
    pub driver_document: String,
    pub transport_company: Option<String>,
    pub supplier_name: String,
    pub supplier_document: String,
    pub responsible_name: String,
    pub responsible_position: Option<String>,
    pub observations: Option<String>,
    pub arrived_at: Option<DateTime<FixedOffset>>,
    pub created_by: String,
    pub products: Vec<NewProduct>,
    pub quality_control: NewQualityControl,
    pub rejection: Option<NewRejection>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub code: String,
    pub quantity: Decimal,
    pub unit: String,
    pub batch: Option<String>,
    pub expires_at: Option<NaiveDate>,
    pub condition: ProductCondition,
    pub observations: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewQualityControl {
    pub responsible_name: String,
    pub analyzed_at: Option<DateTime<FixedOffset>>,
    pub approval_status: ApprovalStatus,
    pub justification: Option<String>,
    pub signature_token: Option<String>,
    pub observations: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewRejection {
    pub reason: String,
    pub forwarded_to_supplies: bool,
    pub forwarded_at: Option<DateTime<FixedOffset>>,
    pub forwarded_by: Option<String>,
    pub cargo_retained: bool,
    pub retained_quantity: Option<Decimal>,
    pub retention_location: Option<String>,
    pub corrective_actions: Option<String>,
}

/// Partial update for the aggregate.
///
/// Presence drives the write: `None` skips the column, `Some(..)` writes it.
/// Nullable columns use a second `Option` layer so an explicit JSON `null`
/// (`Some(None)`) clears the column while an absent field leaves it alone.
#[derive(Debug, Clone, Default)]
pub struct UpdateExpedition {
    pub expedition_number: Option<String>,
    pub dispatched_at: Option<DateTime<FixedOffset>>,
    pub status: Option<ExpeditionStatus>,
    pub truck_plate: Option<String>,
    pub driver_name: Option<String>,
    pub driver_document: Option<String>,
    pub transport_company: Option<Option<String>>,
    pub supplier_name: Option<String>,
    pub supplier_document: Option<String>,
    pub responsible_name: Option<String>,
    pub responsible_position: Option<Option<String>>,
    pub observations: Option<Option<String>>,
    pub arrived_at: Option<Option<DateTime<FixedOffset>>>,
    pub updated_by: Option<String>,
    /// Full replacement: existing rows are deleted and this list reinserted
    pub products: Option<Vec<NewProduct>>,
    pub quality_control: Option<QualityControlPatch>,
    pub rejection: Option<RejectionPatch>,
}

#[derive(Debug, Clone, Default)]
pub struct QualityControlPatch {
    pub responsible_name: Option<String>,
    pub analyzed_at: Option<Option<DateTime<FixedOffset>>>,
    pub approval_status: Option<ApprovalStatus>,
    pub justification: Option<Option<String>>,
    pub signature_token: Option<Option<String>>,
    pub observations: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct RejectionPatch {
    pub reason: Option<String>,
    pub forwarded_to_supplies: Option<bool>,
    pub forwarded_at: Option<Option<DateTime<FixedOffset>>>,
    pub forwarded_by: Option<Option<String>>,
    pub cargo_retained: Option<bool>,
    pub retained_quantity: Option<Option<Decimal>>,
    pub retention_location: Option<Option<String>>,
    pub corrective_actions: Option<Option<String>>,
}

/// Empty-string batch values from the UI mean "absent"
fn normalize_text(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

fn product_active_model(expedition_id: Uuid, product: NewProduct) -> ProductActiveModel {
    ProductActiveModel {
        id: Set(Uuid::new_v4()),
        expedition_id: Set(expedition_id),
        name: Set(product.name),
        code: Set(product.code),
        quantity: Set(product.quantity),
        unit: Set(product.unit),
        batch: Set(normalize_text(product.batch)),
        expires_at: Set(product.expires_at),
        condition: Set(product.condition.as_str().to_string()),
        observations: Set(product.observations),
    }
}

impl Repository {
    // ========================================================================
    // Aggregate reads
    // ========================================================================

    /// List expeditions matching the filter, newest first, with sub-records joined
    pub async fn list_expeditions(
        &self,
        filter: &ExpeditionFilter,
    ) -> Result<Vec<ExpeditionAggregate>> {
        let mut query = ExpeditionEntity::find();

        if let Some(ref number) = filter.expedition_number {
            query = query.filter(ExpeditionColumn::ExpeditionNumber.contains(number.as_str()));
        }
        if let Some(ref plate) = filter.truck_plate {
            query = query.filter(ExpeditionColumn::TruckPlate.contains(plate.as_str()));
        }
        if let Some(ref driver) = filter.driver_name {
            query = query.filter(ExpeditionColumn::DriverName.contains(driver.as_str()));
        }
        if let Some(ref supplier) = filter.supplier_name {
            query = query.filter(ExpeditionColumn::SupplierName.contains(supplier.as_str()));
        }
        if let Some(status) = filter.status {
            query = query.filter(ExpeditionColumn::Status.eq(status.as_str()));
        }
        if let Some(start) = filter.start_bound() {
            query = query.filter(ExpeditionColumn::DispatchedAt.gte(start));
        }
        if let Some(end) = filter.end_bound() {
            query = query.filter(ExpeditionColumn::DispatchedAt.lte(end));
        }

        let expeditions = query
            .order_by_desc(ExpeditionColumn::CreatedAt)
            .all(self.conn())
            .await?;

        self.assemble_aggregates(expeditions).await
    }

    /// Fetch one aggregate by id; `None` when the expedition does not exist
    pub async fn get_expedition(&self, id: Uuid) -> Result<Option<ExpeditionAggregate>> {
        let Some(expedition) = ExpeditionEntity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };

        let mut aggregates = self.assemble_aggregates(vec![expedition]).await?;
        Ok(aggregates.pop())
    }

    /// Expedition counts by status, optionally bounded by the filter's date range
    pub async fn status_counts(&self, filter: &ExpeditionFilter) -> Result<StatusCounts> {
        let mut sql = String::from("SELECT status, COUNT(*) FROM expeditions");
        let mut values: Vec<sea_orm::Value> = Vec::new();
        let mut conditions: Vec<String> = Vec::new();

        if let Some(start) = filter.start_bound() {
            values.push(start.into());
            conditions.push(format!("dispatched_at >= ${}", values.len()));
        }
        if let Some(end) = filter.end_bound() {
            values.push(end.into());
            conditions.push(format!("dispatched_at <= ${}", values.len()));
        }

        if !conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&conditions.join(" AND "));
        }
        sql.push_str(" GROUP BY status");

        let rows = self
            .conn()
            .query_all(Statement::from_sql_and_values(
                DbBackend::Postgres,
                &sql,
                values,
            ))
            .await?;

        let mut counts = StatusCounts::default();
        for row in rows {
            let status: String = row.try_get_by_index(0).map_err(sea_orm::DbErr::from)?;
            let count: i64 = row.try_get_by_index(1).map_err(sea_orm::DbErr::from)?;

            counts.total += count;
            match ExpeditionStatus::parse(&status) {
                Some(ExpeditionStatus::Pending) => counts.pending += count,
                Some(ExpeditionStatus::InAnalysis) => counts.in_analysis += count,
                Some(ExpeditionStatus::Approved) => counts.approved += count,
                Some(ExpeditionStatus::Rejected) => counts.rejected += count,
                Some(ExpeditionStatus::Retained) => counts.retained += count,
                None => {}
            }
        }

        Ok(counts)
    }

    /// Join products, quality control and rejections onto already-fetched rows
    async fn assemble_aggregates(
        &self,
        expeditions: Vec<Expedition>,
    ) -> Result<Vec<ExpeditionAggregate>> {
        if expeditions.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<Uuid> = expeditions.iter().map(|e| e.id).collect();

        let products = ProductEntity::find()
            .filter(ProductColumn::ExpeditionId.is_in(ids.clone()))
            .order_by_asc(ProductColumn::Id)
            .all(self.conn())
            .await?;

        let quality_controls = QualityControlEntity::find()
            .filter(QualityControlColumn::ExpeditionId.is_in(ids.clone()))
            .all(self.conn())
            .await?;

        let rejections = RejectionEntity::find()
            .filter(RejectionColumn::ExpeditionId.is_in(ids))
            .all(self.conn())
            .await?;

        let mut products_by_id: HashMap<Uuid, Vec<Product>> = HashMap::new();
        for product in products {
            products_by_id
                .entry(product.expedition_id)
                .or_default()
                .push(product);
        }

        let mut qc_by_id: HashMap<Uuid, QualityControl> = quality_controls
            .into_iter()
            .map(|qc| (qc.expedition_id, qc))
            .collect();

        let mut rejection_by_id: HashMap<Uuid, Rejection> = rejections
            .into_iter()
            .map(|r| (r.expedition_id, r))
            .collect();

        Ok(expeditions
            .into_iter()
            .map(|expedition| {
                let id = expedition.id;
                ExpeditionAggregate {
                    expedition,
                    products: products_by_id.remove(&id).unwrap_or_default(),
                    quality_control: qc_by_id.remove(&id),
                    rejection: rejection_by_id.remove(&id),
                }
            })
            .collect())
    }

    // ========================================================================
    // Aggregate writes
    // ========================================================================

    /// Create the full aggregate in one transaction and return it re-read
    pub async fn create_expedition(&self, new: NewExpedition) -> Result<ExpeditionAggregate> {
        let id = Uuid::new_v4();
        let now: DateTime<FixedOffset> = Utc::now().into();

        let txn = self.conn().begin().await?;

        ExpeditionActiveModel {
            id: Set(id),
            expedition_number: Set(new.expedition_number),
            dispatched_at: Set(new.dispatched_at),
            status: Set(new.status.as_str().to_string()),
            truck_plate: Set(new.truck_plate),
            driver_name: Set(new.driver_name),
            driver_document: Set(new.driver_document),
            transport_company: Set(new.transport_company),
            supplier_name: Set(new.supplier_name),
            supplier_document: Set(new.supplier_document),
            responsible_name: Set(new.responsible_name),
            responsible_position: Set(new.responsible_position),
            observations: Set(new.observations),
            arrived_at: Set(new.arrived_at),
            created_at: Set(now),
            updated_at: Set(now),
            created_by: Set(new.created_by),
            updated_by: Set(None),
        }
        .insert(&txn)
        .await?;

        if !new.products.is_empty() {
            let rows: Vec<ProductActiveModel> = new
                .products
                .into_iter()
                .map(|p| product_active_model(id, p))
                .collect();
            ProductEntity::insert_many(rows).exec(&txn).await?;
        }

        let qc = new.quality_control;
        QualityControlActiveModel {
            id: Set(Uuid::new_v4()),
            expedition_id: Set(id),
            responsible_name: Set(qc.responsible_name),
            analyzed_at: Set(qc.analyzed_at),
            approval_status: Set(qc.approval_status.as_str().to_string()),
            justification: Set(qc.justification),
            signature_token: Set(qc.signature_token),
            observations: Set(qc.observations),
        }
        .insert(&txn)
        .await?;

        if let Some(rejection) = new.rejection {
            RejectionActiveModel {
                id: Set(Uuid::new_v4()),
                expedition_id: Set(id),
                reason: Set(rejection.reason),
                forwarded_to_supplies: Set(rejection.forwarded_to_supplies),
                forwarded_at: Set(rejection.forwarded_at),
                forwarded_by: Set(rejection.forwarded_by),
                cargo_retained: Set(rejection.cargo_retained),
                retained_quantity: Set(rejection.retained_quantity),
                retention_location: Set(rejection.retention_location),
                corrective_actions: Set(rejection.corrective_actions),
            }
            .insert(&txn)
            .await?;
        }

        txn.commit().await?;

        crate::metrics::record_expedition_created();

        self.get_expedition(id).await?.ok_or_else(|| AppError::Internal {
            message: format!("Expedition {} vanished after commit", id),
        })
    }

    /// Apply a partial update to the aggregate in one transaction.
    ///
    /// Returns `None` (after rolling back) when the expedition does not exist.
    pub async fn update_expedition(
        &self,
        id: Uuid,
        patch: UpdateExpedition,
    ) -> Result<Option<ExpeditionAggregate>> {
        let txn = self.conn().begin().await?;

        let mut row = ExpeditionActiveModel {
            ..Default::default()
        };
        let mut touched = false;

        if let Some(v) = patch.expedition_number {
            row.expedition_number = Set(v);
            touched = true;
        }
        if let Some(v) = patch.dispatched_at {
            row.dispatched_at = Set(v);
            touched = true;
        }
        if let Some(v) = patch.status {
            row.status = Set(v.as_str().to_string());
            touched = true;
        }
        if let Some(v) = patch.truck_plate {
            row.truck_plate = Set(v);
            touched = true;
        }
        if let Some(v) = patch.driver_name {
            row.driver_name = Set(v);
            touched = true;
        }
        if let Some(v) = patch.driver_document {
            row.driver_document = Set(v);
            touched = true;
        }
        if let Some(v) = patch.transport_company {
            row.transport_company = Set(v);
            touched = true;
        }
        if let Some(v) = patch.supplier_name {
            row.supplier_name = Set(v);
            touched = true;
        }
        if let Some(v) = patch.supplier_document {
            row.supplier_document = Set(v);
            touched = true;
        }
        if let Some(v) = patch.responsible_name {
            row.responsible_name = Set(v);
            touched = true;
        }
        if let Some(v) = patch.responsible_position {
            row.responsible_position = Set(v);
            touched = true;
        }
        if let Some(v) = patch.observations {
            row.observations = Set(v);
            touched = true;
        }
        if let Some(v) = patch.arrived_at {
            row.arrived_at = Set(v);
            touched = true;
        }

        if touched {
            row.updated_at = Set(Utc::now().into());
            if let Some(by) = patch.updated_by {
                row.updated_by = Set(Some(by));
            }

            let result = ExpeditionEntity::update_many()
                .set(row)
                .filter(ExpeditionColumn::Id.eq(id))
                .exec(&txn)
                .await?;

            if result.rows_affected == 0 {
                txn.rollback().await?;
                return Ok(None);
            }
        } else {
            // Nothing scalar to write, but the caller still needs a not-found signal
            if ExpeditionEntity::find_by_id(id).one(&txn).await?.is_none() {
                txn.rollback().await?;
                return Ok(None);
            }
        }

        if let Some(products) = patch.products {
            // Full replacement: the supplied list becomes the entire collection
            ProductEntity::delete_many()
                .filter(ProductColumn::ExpeditionId.eq(id))
                .exec(&txn)
                .await?;

            if !products.is_empty() {
                let rows: Vec<ProductActiveModel> = products
                    .into_iter()
                    .map(|p| product_active_model(id, p))
                    .collect();
                ProductEntity::insert_many(rows).exec(&txn).await?;
            }
        }

        if let Some(ref qc_patch) = patch.quality_control {
            self.apply_quality_control_patch(&txn, id, qc_patch).await?;
        }

        if let Some(ref rejection_patch) = patch.rejection {
            self.apply_rejection_patch(&txn, id, rejection_patch).await?;
        }

        txn.commit().await?;

        Ok(self.get_expedition(id).await?)
    }

    /// Delete the aggregate; reports whether the expedition row existed
    pub async fn delete_expedition(&self, id: Uuid) -> Result<bool> {
        let txn = self.conn().begin().await?;

        // Children first, respecting foreign keys
        ProductEntity::delete_many()
            .filter(ProductColumn::ExpeditionId.eq(id))
            .exec(&txn)
            .await?;
        QualityControlEntity::delete_many()
            .filter(QualityControlColumn::ExpeditionId.eq(id))
            .exec(&txn)
            .await?;
        RejectionEntity::delete_many()
            .filter(RejectionColumn::ExpeditionId.eq(id))
            .exec(&txn)
            .await?;

        let result = ExpeditionEntity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Sub-record updates
    // ========================================================================

    /// Standalone quality-control update (own transaction).
    ///
    /// Returns `None` when the expedition does not exist.
    pub async fn update_quality_control(
        &self,
        id: Uuid,
        patch: QualityControlPatch,
    ) -> Result<Option<ExpeditionAggregate>> {
        let txn = self.conn().begin().await?;

        if ExpeditionEntity::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(None);
        }

        self.apply_quality_control_patch(&txn, id, &patch).await?;

        txn.commit().await?;

        Ok(self.get_expedition(id).await?)
    }

    /// Standalone rejection update (own transaction).
    ///
    /// Returns `None` when the expedition does not exist.
    pub async fn update_rejection(
        &self,
        id: Uuid,
        patch: RejectionPatch,
    ) -> Result<Option<ExpeditionAggregate>> {
        let txn = self.conn().begin().await?;

        if ExpeditionEntity::find_by_id(id).one(&txn).await?.is_none() {
            txn.rollback().await?;
            return Ok(None);
        }

        self.apply_rejection_patch(&txn, id, &patch).await?;

        txn.commit().await?;

        Ok(self.get_expedition(id).await?)
    }

    /// In-place quality-control update within the caller's transaction.
    ///
    /// The row is created together with its expedition, so zero affected rows
    /// means the aggregate is corrupt; that surfaces as an error rather than a
    /// silent no-op.
    async fn apply_quality_control_patch<C: ConnectionTrait>(
        &self,
        conn: &C,
        expedition_id: Uuid,
        patch: &QualityControlPatch,
    ) -> Result<()> {
        let mut row = QualityControlActiveModel {
            ..Default::default()
        };
        let mut touched = false;

        if let Some(ref v) = patch.responsible_name {
            row.responsible_name = Set(v.clone());
            touched = true;
        }
        if let Some(v) = patch.analyzed_at {
            row.analyzed_at = Set(v);
            touched = true;
        }
        if let Some(v) = patch.approval_status {
            row.approval_status = Set(v.as_str().to_string());
            touched = true;
        }
        if let Some(ref v) = patch.justification {
            row.justification = Set(v.clone());
            touched = true;
        }
        if let Some(ref v) = patch.signature_token {
            row.signature_token = Set(v.clone());
            touched = true;
        }
        if let Some(ref v) = patch.observations {
            row.observations = Set(v.clone());
            touched = true;
        }

        if touched {
            let result = QualityControlEntity::update_many()
                .set(row)
                .filter(QualityControlColumn::ExpeditionId.eq(expedition_id))
                .exec(conn)
                .await?;

            if result.rows_affected == 0 {
                return Err(AppError::NotFound {
                    resource_type: "qualityControl".to_string(),
                    id: expedition_id.to_string(),
                });
            }
        }

        if let Some(outcome) = patch.approval_status {
            if let Some(status) = ExpeditionStatus::apply_quality_outcome(outcome) {
                self.write_status(conn, expedition_id, status).await?;
            }
        }

        Ok(())
    }

    /// Rejection upsert within the caller's transaction.
    ///
    /// Rejection rows are created lazily, the first time rejection data arrives.
    async fn apply_rejection_patch<C: ConnectionTrait>(
        &self,
        conn: &C,
        expedition_id: Uuid,
        patch: &RejectionPatch,
    ) -> Result<()> {
        let existing = RejectionEntity::find()
            .filter(RejectionColumn::ExpeditionId.eq(expedition_id))
            .one(conn)
            .await?;

        match existing {
            Some(_) => {
                let mut row = RejectionActiveModel {
                    ..Default::default()
                };
                let mut touched = false;

                if let Some(ref v) = patch.reason {
                    row.reason = Set(v.clone());
                    touched = true;
                }
                if let Some(v) = patch.forwarded_to_supplies {
                    row.forwarded_to_supplies = Set(v);
                    touched = true;
                }
                if let Some(v) = patch.forwarded_at {
                    row.forwarded_at = Set(v);
                    touched = true;
                }
                if let Some(ref v) = patch.forwarded_by {
                    row.forwarded_by = Set(v.clone());
                    touched = true;
                }
                if let Some(v) = patch.cargo_retained {
                    row.cargo_retained = Set(v);
                    touched = true;
                }
                if let Some(v) = patch.retained_quantity {
                    row.retained_quantity = Set(v);
                    touched = true;
                }
                if let Some(ref v) = patch.retention_location {
                    row.retention_location = Set(v.clone());
                    touched = true;
                }
                if let Some(ref v) = patch.corrective_actions {
                    row.corrective_actions = Set(v.clone());
                    touched = true;
                }

                if touched {
                    RejectionEntity::update_many()
                        .set(row)
                        .filter(RejectionColumn::ExpeditionId.eq(expedition_id))
                        .exec(conn)
                        .await?;
                }
            }
            None => {
                RejectionActiveModel {
                    id: Set(Uuid::new_v4()),
                    expedition_id: Set(expedition_id),
                    reason: Set(patch.reason.clone().unwrap_or_default()),
                    forwarded_to_supplies: Set(patch.forwarded_to_supplies.unwrap_or(false)),
                    forwarded_at: Set(patch.forwarded_at.flatten()),
                    forwarded_by: Set(patch.forwarded_by.clone().flatten()),
                    cargo_retained: Set(patch.cargo_retained.unwrap_or(false)),
                    retained_quantity: Set(patch.retained_quantity.flatten()),
                    retention_location: Set(patch.retention_location.clone().flatten()),
                    corrective_actions: Set(patch.corrective_actions.clone().flatten()),
                }
                .insert(conn)
                .await?;
            }
        }

        if let Some(status) =
            ExpeditionStatus::apply_retention(patch.cargo_retained.unwrap_or(false))
        {
            self.write_status(conn, expedition_id, status).await?;
        }

        Ok(())
    }

    /// Overwrite the expedition status as a sub-record side effect
    async fn write_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        expedition_id: Uuid,
        status: ExpeditionStatus,
    ) -> Result<()> {
        let result = ExpeditionEntity::update_many()
            .set(ExpeditionActiveModel {
                status: Set(status.as_str().to_string()),
                updated_at: Set(Utc::now().into()),
                ..Default::default()
            })
            .filter(ExpeditionColumn::Id.eq(expedition_id))
            .exec(conn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::ExpeditionNotFound {
                id: expedition_id.to_string(),
            });
        }

        crate::metrics::record_status_transition(status.as_str());

        tracing::info!(
            expedition_id = %expedition_id,
            status = status.as_str(),
            "Expedition status overwritten by sub-record update"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_date_bounds_are_inclusive_day_edges() {
        let filter = ExpeditionFilter {
            start_date: NaiveDate::from_ymd_opt(2025, 3, 1),
            end_date: NaiveDate::from_ymd_opt(2025, 3, 31),
            ..Default::default()
        };

        let start = filter.start_bound().unwrap();
        let end = filter.end_bound().unwrap();

        assert_eq!(start.to_rfc3339(), "2025-03-01T00:00:00+00:00");
        assert_eq!(end.to_rfc3339(), "2025-03-31T23:59:59+00:00");
    }

    #[test]
    fn test_filter_without_dates_has_no_bounds() {
        let filter = ExpeditionFilter::default();
        assert!(filter.start_bound().is_none());
        assert!(filter.end_bound().is_none());
    }

    #[test]
    fn test_normalize_text_drops_empty_strings() {
        assert_eq!(normalize_text(Some("L-42".to_string())), Some("L-42".to_string()));
        assert_eq!(normalize_text(Some("".to_string())), None);
        assert_eq!(normalize_text(Some("   ".to_string())), None);
        assert_eq!(normalize_text(None), None);
    }

    #[test]
    fn test_product_active_model_gets_fresh_id_and_normalized_batch() {
        let new = NewProduct {
            name: "Widget".to_string(),
            code: "W1".to_string(),
            quantity: Decimal::new(10, 0),
            unit: "UN".to_string(),
            batch: Some("".to_string()),
            expires_at: None,
            condition: ProductCondition::New,
            observations: None,
        };

        let expedition_id = Uuid::new_v4();
        let row = product_active_model(expedition_id, new.clone());
        let row2 = product_active_model(expedition_id, new);

        assert_eq!(row.batch.clone().unwrap(), None);
        assert_eq!(row.condition.clone().unwrap(), "novo");
        assert_ne!(row.id.clone().unwrap(), row2.id.clone().unwrap());
    }
}
