//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connections, migrations and repositories
//! - JSON serialization
//! - Unit of Work for transaction management

pub mod db;
pub mod repositories;
pub mod serializer;
pub mod unit_of_work;

pub use db::{Database, Migrator};
pub use repositories::{EventRepository, EventStore, RegionRepository, RegionStore};
pub use serializer::Serializer;
pub use unit_of_work::{Persistence, TransactionContext, TxFuture, UnitOfWork};

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::{MockEventRepository, MockRegionRepository};
