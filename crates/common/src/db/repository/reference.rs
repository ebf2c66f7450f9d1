//! Single-table CRUD for the reference entities
//!
//! Drivers, trucks, transport companies, suppliers, catalog items and the two
//! responsible registries all follow the same contract: list, find, create,
//! update-present-fields, delete.

use super::Repository;
use crate::db::models::*;
use crate::errors::Result;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::{ActiveModelTrait, EntityTrait, QueryOrder, Set};
use uuid::Uuid;

fn now() -> DateTime<FixedOffset> {
    Utc::now().into()
}

impl Repository {
    // ========================================================================
    // Drivers
    // ========================================================================

    pub async fn list_drivers(&self) -> Result<Vec<Driver>> {
        DriverEntity::find()
            .order_by_asc(DriverColumn::Name)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_driver(&self, id: Uuid) -> Result<Option<Driver>> {
        DriverEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_driver(
        &self,
        name: String,
        document: String,
        phone: Option<String>,
    ) -> Result<Driver> {
        DriverActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            document: Set(document),
            phone: Set(phone),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }

    pub async fn update_driver(
        &self,
        id: Uuid,
        name: Option<String>,
        document: Option<String>,
        phone: Option<Option<String>>,
    ) -> Result<Option<Driver>> {
        let Some(existing) = DriverEntity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };

        let mut row: DriverActiveModel = existing.into();
        if let Some(v) = name {
            row.name = Set(v);
        }
        if let Some(v) = document {
            row.document = Set(v);
        }
        if let Some(v) = phone {
            row.phone = Set(v);
        }
        row.updated_at = Set(now());

        Ok(Some(row.update(self.conn()).await?))
    }

    pub async fn delete_driver(&self, id: Uuid) -> Result<bool> {
        let result = DriverEntity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Trucks
    // ========================================================================

    pub async fn list_trucks(&self) -> Result<Vec<Truck>> {
        TruckEntity::find()
            .order_by_asc(TruckColumn::Plate)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_truck(&self, id: Uuid) -> Result<Option<Truck>> {
        TruckEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_truck(
        &self,
        plate: String,
        brand: Option<String>,
        model: Option<String>,
        year: Option<i32>,
    ) -> Result<Truck> {
        TruckActiveModel {
            id: Set(Uuid::new_v4()),
            plate: Set(plate),
            brand: Set(brand),
            model: Set(model),
            year: Set(year),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }

    pub async fn update_truck(
        &self,
        id: Uuid,
        plate: Option<String>,
        brand: Option<Option<String>>,
        model: Option<Option<String>>,
        year: Option<Option<i32>>,
    ) -> Result<Option<Truck>> {
        let Some(existing) = TruckEntity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };

        let mut row: TruckActiveModel = existing.into();
        if let Some(v) = plate {
            row.plate = Set(v);
        }
        if let Some(v) = brand {
            row.brand = Set(v);
        }
        if let Some(v) = model {
            row.model = Set(v);
        }
        if let Some(v) = year {
            row.year = Set(v);
        }
        row.updated_at = Set(now());

        Ok(Some(row.update(self.conn()).await?))
    }

    pub async fn delete_truck(&self, id: Uuid) -> Result<bool> {
        let result = TruckEntity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Transport companies
    // ========================================================================

    pub async fn list_transport_companies(&self) -> Result<Vec<TransportCompany>> {
        TransportCompanyEntity::find()
            .order_by_asc(TransportCompanyColumn::Name)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_transport_company(&self, id: Uuid) -> Result<Option<TransportCompany>> {
        TransportCompanyEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_transport_company(
        &self,
        name: String,
        document: String,
        phone: Option<String>,
    ) -> Result<TransportCompany> {
        TransportCompanyActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            document: Set(document),
            phone: Set(phone),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }

    pub async fn update_transport_company(
        &self,
        id: Uuid,
        name: Option<String>,
        document: Option<String>,
        phone: Option<Option<String>>,
    ) -> Result<Option<TransportCompany>> {
        let Some(existing) = TransportCompanyEntity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };

        let mut row: TransportCompanyActiveModel = existing.into();
        if let Some(v) = name {
            row.name = Set(v);
        }
        if let Some(v) = document {
            row.document = Set(v);
        }
        if let Some(v) = phone {
            row.phone = Set(v);
        }
        row.updated_at = Set(now());

        Ok(Some(row.update(self.conn()).await?))
    }

    pub async fn delete_transport_company(&self, id: Uuid) -> Result<bool> {
        let result = TransportCompanyEntity::delete_by_id(id)
            .exec(self.conn())
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Suppliers
    // ========================================================================

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        SupplierEntity::find()
            .order_by_asc(SupplierColumn::Name)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_supplier(&self, id: Uuid) -> Result<Option<Supplier>> {
        SupplierEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_supplier(
        &self,
        name: String,
        document: String,
        email: Option<String>,
        phone: Option<String>,
    ) -> Result<Supplier> {
        SupplierActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            document: Set(document),
            email: Set(email),
            phone: Set(phone),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }

    pub async fn update_supplier(
        &self,
        id: Uuid,
        name: Option<String>,
        document: Option<String>,
        email: Option<Option<String>>,
        phone: Option<Option<String>>,
    ) -> Result<Option<Supplier>> {
        let Some(existing) = SupplierEntity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };

        let mut row: SupplierActiveModel = existing.into();
        if let Some(v) = name {
            row.name = Set(v);
        }
        if let Some(v) = document {
            row.document = Set(v);
        }
        if let Some(v) = email {
            row.email = Set(v);
        }
        if let Some(v) = phone {
            row.phone = Set(v);
        }
        row.updated_at = Set(now());

        Ok(Some(row.update(self.conn()).await?))
    }

    pub async fn delete_supplier(&self, id: Uuid) -> Result<bool> {
        let result = SupplierEntity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Product catalog
    // ========================================================================

    pub async fn list_catalog_items(&self) -> Result<Vec<CatalogItem>> {
        CatalogItemEntity::find()
            .order_by_asc(CatalogItemColumn::Name)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_catalog_item(&self, id: Uuid) -> Result<Option<CatalogItem>> {
        CatalogItemEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_catalog_item(
        &self,
        name: String,
        code: String,
        unit: String,
    ) -> Result<CatalogItem> {
        CatalogItemActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            code: Set(code),
            unit: Set(unit),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }

    pub async fn update_catalog_item(
        &self,
        id: Uuid,
        name: Option<String>,
        code: Option<String>,
        unit: Option<String>,
    ) -> Result<Option<CatalogItem>> {
        let Some(existing) = CatalogItemEntity::find_by_id(id).one(self.conn()).await? else {
            return Ok(None);
        };

        let mut row: CatalogItemActiveModel = existing.into();
        if let Some(v) = name {
            row.name = Set(v);
        }
        if let Some(v) = code {
            row.code = Set(v);
        }
        if let Some(v) = unit {
            row.unit = Set(v);
        }
        row.updated_at = Set(now());

        Ok(Some(row.update(self.conn()).await?))
    }

    pub async fn delete_catalog_item(&self, id: Uuid) -> Result<bool> {
        let result = CatalogItemEntity::delete_by_id(id).exec(self.conn()).await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Expedition responsibles
    // ========================================================================

    pub async fn list_expedition_responsibles(&self) -> Result<Vec<ExpeditionResponsible>> {
        ExpeditionResponsibleEntity::find()
            .order_by_asc(ExpeditionResponsibleColumn::Name)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_expedition_responsible(
        &self,
        id: Uuid,
    ) -> Result<Option<ExpeditionResponsible>> {
        ExpeditionResponsibleEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_expedition_responsible(
        &self,
        name: String,
        position: Option<String>,
    ) -> Result<ExpeditionResponsible> {
        ExpeditionResponsibleActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            position: Set(position),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }

    pub async fn update_expedition_responsible(
        &self,
        id: Uuid,
        name: Option<String>,
        position: Option<Option<String>>,
    ) -> Result<Option<ExpeditionResponsible>> {
        let Some(existing) = ExpeditionResponsibleEntity::find_by_id(id)
            .one(self.conn())
            .await?
        else {
            return Ok(None);
        };

        let mut row: ExpeditionResponsibleActiveModel = existing.into();
        if let Some(v) = name {
            row.name = Set(v);
        }
        if let Some(v) = position {
            row.position = Set(v);
        }
        row.updated_at = Set(now());

        Ok(Some(row.update(self.conn()).await?))
    }

    pub async fn delete_expedition_responsible(&self, id: Uuid) -> Result<bool> {
        let result = ExpeditionResponsibleEntity::delete_by_id(id)
            .exec(self.conn())
            .await?;
        Ok(result.rows_affected > 0)
    }

    // ========================================================================
    // Quality responsibles
    // ========================================================================

    pub async fn list_quality_responsibles(&self) -> Result<Vec<QualityResponsible>> {
        QualityResponsibleEntity::find()
            .order_by_asc(QualityResponsibleColumn::Name)
            .all(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn find_quality_responsible(&self, id: Uuid) -> Result<Option<QualityResponsible>> {
        QualityResponsibleEntity::find_by_id(id)
            .one(self.conn())
            .await
            .map_err(Into::into)
    }

    pub async fn create_quality_responsible(
        &self,
        name: String,
        position: Option<String>,
    ) -> Result<QualityResponsible> {
        QualityResponsibleActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set(name),
            position: Set(position),
            created_at: Set(now()),
            updated_at: Set(now()),
        }
        .insert(self.conn())
        .await
        .map_err(Into::into)
    }

    pub async fn update_quality_responsible(
        &self,
        id: Uuid,
        name: Option<String>,
        position: Option<Option<String>>,
    ) -> Result<Option<QualityResponsible>> {
        let Some(existing) = QualityResponsibleEntity::find_by_id(id)
            .one(self.conn())
            .await?
        else {
            return Ok(None);
        };

        let mut row: QualityResponsibleActiveModel = existing.into();
        if let Some(v) = name {
            row.name = Set(v);
        }
        if let Some(v) = position {
            row.position = Set(v);
        }
        row.updated_at = Set(now());

        Ok(Some(row.update(self.conn()).await?))
    }

    pub async fn delete_quality_responsible(&self, id: Uuid) -> Result<bool> {
        let result = QualityResponsibleEntity::delete_by_id(id)
            .exec(self.conn())
            .await?;
        Ok(result.rows_affected > 0)
    }
}
