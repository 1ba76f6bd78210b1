//! Unit of Work pattern implementation.
//!
//! Centralizes access to the repositories and runs multi-step
//! operations (such as dataset imports) atomically.

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use std::sync::Arc;

use super::repositories::{
    edition_exists, find_region, insert_event, insert_region, EventRepository, EventStore, RegionRepository,
    RegionStore,
};
use crate::domain::{Event, NewEvent, Region};
use crate::errors::{AppError, AppResult};

/// Boxed future returned by transactional closures
pub type TxFuture<'a, T> =
    std::pin::Pin<Box<dyn std::future::Future<Output = AppResult<T>> + Send + 'a>>;

/// Unit of Work trait for dependency injection.
///
/// Note: This trait is not mockable directly due to generic methods.
/// For testing, mock at the service level or use integration tests.
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Get region repository
    fn regions(&self) -> Arc<dyn RegionRepository>;

    /// Get event repository
    fn events(&self) -> Arc<dyn EventRepository>;

    /// Execute a closure within a transaction.
    ///
    /// The transaction is committed on success and rolled back on error.
    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send;
}

/// Transaction context providing repository access within a transaction.
pub struct TransactionContext<'a> {
    txn: &'a DatabaseTransaction,
}

impl<'a> TransactionContext<'a> {
    fn new(txn: &'a DatabaseTransaction) -> Self {
        Self { txn }
    }

    /// Find a region inside the transaction
    pub async fn find_region(&self, noc: &str) -> AppResult<Option<Region>> {
        find_region(self.txn, noc).await
    }

    /// Insert a region inside the transaction
    pub async fn insert_region(&self, region: Region) -> AppResult<Region> {
        insert_region(self.txn, region).await
    }

    /// Whether the same games edition is already stored
    pub async fn edition_exists(&self, event: &NewEvent) -> AppResult<bool> {
        edition_exists(self.txn, event).await
    }

    /// Insert an event inside the transaction
    pub async fn insert_event(&self, event: NewEvent) -> AppResult<Event> {
        insert_event(self.txn, event).await
    }
}

/// Concrete implementation of UnitOfWork
pub struct Persistence {
    db: DatabaseConnection,
    region_repo: Arc<RegionStore>,
    event_repo: Arc<EventStore>,
}

impl Persistence {
    /// Create new UnitOfWork instance
    pub fn new(db: DatabaseConnection) -> Self {
        let region_repo = Arc::new(RegionStore::new(db.clone()));
        let event_repo = Arc::new(EventStore::new(db.clone()));
        Self {
            db,
            region_repo,
            event_repo,
        }
    }
}

#[async_trait]
impl UnitOfWork for Persistence {
    fn regions(&self) -> Arc<dyn RegionRepository> {
        self.region_repo.clone()
    }

    fn events(&self) -> Arc<dyn EventRepository> {
        self.event_repo.clone()
    }

    async fn transaction<F, T>(&self, f: F) -> AppResult<T>
    where
        F: for<'a> FnOnce(TransactionContext<'a>) -> TxFuture<'a, T> + Send,
        T: Send,
    {
        let txn = self.db.begin().await.map_err(AppError::from)?;

        let ctx = TransactionContext::new(&txn);

        match f(ctx).await {
            Ok(result) => {
                txn.commit().await.map_err(AppError::from)?;
                Ok(result)
            }
            Err(e) => {
                if let Err(rollback_err) = txn.rollback().await {
                    tracing::error!("Transaction rollback failed: {}", rollback_err);
                }
                Err(e)
            }
        }
    }
}

/// Simpler API for executing transactional operations.
#[macro_export]
macro_rules! with_transaction {
    ($uow:expr, |$ctx:ident| $body:expr) => {
        $uow.transaction(|$ctx| Box::pin(async move { $body })).await
    };
}
