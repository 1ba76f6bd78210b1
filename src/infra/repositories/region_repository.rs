//! Region repository implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder,
    SqlErr,
};

use super::entities::region::{self, ActiveModel, Entity as RegionEntity};
use crate::domain::Region;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Region repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait RegionRepository: Send + Sync {
    /// Find region by NOC code
    async fn find_by_noc(&self, noc: &str) -> AppResult<Option<Region>>;

    /// List all regions ordered by NOC code
    async fn list(&self) -> AppResult<Vec<Region>>;

    /// Insert a new region
    async fn create(&self, region: Region) -> AppResult<Region>;

    /// Overwrite name and notes of an existing region
    async fn update(&self, region: Region) -> AppResult<Region>;

    /// Delete region by NOC code
    async fn delete(&self, noc: &str) -> AppResult<()>;
}

/// Concrete implementation of RegionRepository
pub struct RegionStore {
    db: DatabaseConnection,
}

impl RegionStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl RegionRepository for RegionStore {
    async fn find_by_noc(&self, noc: &str) -> AppResult<Option<Region>> {
        find_region(&self.db, noc).await
    }

    async fn list(&self) -> AppResult<Vec<Region>> {
        let models = RegionEntity::find()
            .order_by_asc(region::Column::Noc)
            .all(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(models.into_iter().map(Region::from).collect())
    }

    async fn create(&self, region: Region) -> AppResult<Region> {
        insert_region(&self.db, region).await
    }

    async fn update(&self, region: Region) -> AppResult<Region> {
        let noc = region.noc.clone();
        let model = ActiveModel::from(region)
            .update(&self.db)
            .await
            .map_err(|e| match e {
                sea_orm::DbErr::RecordNotUpdated => AppError::not_found(format!("Region {}", noc)),
                other => AppError::from(other),
            })?;

        Ok(Region::from(model))
    }

    async fn delete(&self, noc: &str) -> AppResult<()> {
        let result = RegionEntity::delete_by_id(noc.to_string())
            .exec(&self.db)
            .await
            .map_err(|e| {
                constraint_conflict(e, || format!("Region {} is referenced by events", noc))
            })?;

        if result.rows_affected == 0 {
            return Err(AppError::not_found(format!("Region {}", noc)));
        }

        Ok(())
    }
}

/// Look up a region on any connection (pool or transaction)
pub(crate) async fn find_region<C: ConnectionTrait>(conn: &C, noc: &str) -> AppResult<Option<Region>> {
    let result = RegionEntity::find_by_id(noc.to_string())
        .one(conn)
        .await
        .map_err(AppError::from)?;

    Ok(result.map(Region::from))
}

/// Insert a region on any connection (pool or transaction)
pub(crate) async fn insert_region<C: ConnectionTrait>(conn: &C, region: Region) -> AppResult<Region> {
    let noc = region.noc.clone();
    let model = ActiveModel::from(region)
        .insert(conn)
        .await
        .map_err(|e| constraint_conflict(e, || format!("Region {} already exists", noc)))?;

    Ok(Region::from(model))
}

/// Key and reference violations are conflicts with concurrent writers;
/// anything else stays a database error
fn constraint_conflict(err: DbErr, message: impl FnOnce() -> String) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_))
        | Some(SqlErr::ForeignKeyConstraintViolation(_)) => AppError::Conflict(message()),
        _ => AppError::from(err),
    }
}
