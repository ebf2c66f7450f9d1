//! SeaORM entity models
//!
//! Database entities for Expedlog

mod catalog_item;
mod driver;
mod expedition;
mod expedition_responsible;
mod product;
mod quality_control;
mod quality_responsible;
mod rejection;
mod supplier;
mod transport_company;
mod truck;
mod user;

pub use expedition::{
    ActiveModel as ExpeditionActiveModel,
    Column as ExpeditionColumn,
    Entity as ExpeditionEntity,
    ExpeditionStatus,
    Model as Expedition,
};

pub use product::{
    ActiveModel as ProductActiveModel,
    Column as ProductColumn,
    Entity as ProductEntity,
    Model as Product,
    ProductCondition,
};

pub use quality_control::{
    ActiveModel as QualityControlActiveModel,
    ApprovalStatus,
    Column as QualityControlColumn,
    Entity as QualityControlEntity,
    Model as QualityControl,
};

pub use rejection::{
    ActiveModel as RejectionActiveModel,
    Column as RejectionColumn,
    Entity as RejectionEntity,
    Model as Rejection,
};

pub use driver::{
    ActiveModel as DriverActiveModel,
    Column as DriverColumn,
    Entity as DriverEntity,
    Model as Driver,
};

pub use truck::{
    ActiveModel as TruckActiveModel,
    Column as TruckColumn,
    Entity as TruckEntity,
    Model as Truck,
};

pub use transport_company::{
    ActiveModel as TransportCompanyActiveModel,
    Column as TransportCompanyColumn,
    Entity as TransportCompanyEntity,
    Model as TransportCompany,
};

pub use supplier::{
    ActiveModel as SupplierActiveModel,
    Column as SupplierColumn,
    Entity as SupplierEntity,
    Model as Supplier,
};

pub use catalog_item::{
    ActiveModel as CatalogItemActiveModel,
    Column as CatalogItemColumn,
    Entity as CatalogItemEntity,
    Model as CatalogItem,
};

pub use expedition_responsible::{
    ActiveModel as ExpeditionResponsibleActiveModel,
    Column as ExpeditionResponsibleColumn,
    Entity as ExpeditionResponsibleEntity,
    Model as ExpeditionResponsible,
};

pub use quality_responsible::{
    ActiveModel as QualityResponsibleActiveModel,
    Column as QualityResponsibleColumn,
    Entity as QualityResponsibleEntity,
    Model as QualityResponsible,
};

pub use user::{
    ActiveModel as UserActiveModel,
    Column as UserColumn,
    Entity as UserEntity,
    Model as User,
    UserRole,
};
