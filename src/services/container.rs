//! Service Container - Centralized service access.
//!
//! Every service of one application shares the same Unit of Work, and
//! therefore the same connection pool.

use std::sync::Arc;

use super::{
    DataImporter, EventManager, EventService, ImportService, RegionManager, RegionService,
};
use crate::infra::Persistence;

/// Service container trait for dependency injection.
pub trait ServiceContainer: Send + Sync {
    /// Get region service
    fn regions(&self) -> Arc<dyn RegionService>;

    /// Get event service
    fn events(&self) -> Arc<dyn EventService>;

    /// Get dataset importer
    fn importer(&self) -> Arc<dyn ImportService>;
}

/// Concrete implementation of ServiceContainer
#[derive(Clone)]
pub struct Services {
    region_service: Arc<dyn RegionService>,
    event_service: Arc<dyn EventService>,
    import_service: Arc<dyn ImportService>,
}

impl Services {
    /// Create a container from already built services
    pub fn new(
        region_service: Arc<dyn RegionService>,
        event_service: Arc<dyn EventService>,
        import_service: Arc<dyn ImportService>,
    ) -> Self {
        Self {
            region_service,
            event_service,
            import_service,
        }
    }

    /// Create service container from a database connection
    pub fn from_connection(db: sea_orm::DatabaseConnection) -> Self {
        let uow = Arc::new(Persistence::new(db));

        Self {
            region_service: Arc::new(RegionManager::new(uow.clone())),
            event_service: Arc::new(EventManager::new(uow.clone())),
            import_service: Arc::new(DataImporter::new(uow)),
        }
    }
}

impl ServiceContainer for Services {
    fn regions(&self) -> Arc<dyn RegionService> {
        self.region_service.clone()
    }

    fn events(&self) -> Arc<dyn EventService> {
        self.event_service.clone()
    }

    fn importer(&self) -> Arc<dyn ImportService> {
        self.import_service.clone()
    }
}
