//! Repository pattern for database operations
//!
//! Provides a clean interface for all data access operations
//! with proper error handling and transaction support.

mod expeditions;
mod reference;
mod users;

pub use expeditions::{
    ExpeditionAggregate, ExpeditionFilter, NewExpedition, NewProduct, NewQualityControl,
    NewRejection, QualityControlPatch, RejectionPatch, StatusCounts, UpdateExpedition,
};
pub use users::NewUser;

use crate::db::DbPool;
use crate::errors::Result;
use sea_orm::DatabaseConnection;

/// Repository for data access operations
#[derive(Clone)]
pub struct Repository {
    pool: DbPool,
}

impl Repository {
    /// Create a new repository with the given connection pool
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get the underlying connection
    pub(crate) fn conn(&self) -> &DatabaseConnection {
        self.pool.conn()
    }

    /// Ping the database
    pub async fn ping(&self) -> Result<()> {
        self.pool.ping().await
    }
}
