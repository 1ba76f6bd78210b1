//! Application state - Dependency injection container.
//!
//! Holds the services and extension handles one application's handlers
//! need. Each application builds its own state from its own extensions.

use std::sync::Arc;

use crate::app::Extensions;
use crate::infra::{Database, Serializer};
use crate::services::{EventService, RegionService, ServiceContainer, Services};

/// Application state containing all services (DI container).
#[derive(Clone)]
pub struct AppState {
    /// Region service
    pub regions: Arc<dyn RegionService>,
    /// Event service
    pub events: Arc<dyn EventService>,
    /// JSON serializer of this application
    pub serializer: Arc<Serializer>,
    /// Database extension
    pub database: Arc<Database>,
}

impl AppState {
    /// Create application state from bound extensions.
    pub fn from_extensions(extensions: &Extensions) -> Self {
        let container = Services::from_connection(extensions.database.get_connection());

        Self {
            regions: container.regions(),
            events: container.events(),
            serializer: extensions.serializer.clone(),
            database: extensions.database.clone(),
        }
    }

    /// Create new application state with manually injected services.
    pub fn new(
        regions: Arc<dyn RegionService>,
        events: Arc<dyn EventService>,
        serializer: Arc<Serializer>,
        database: Arc<Database>,
    ) -> Self {
        Self {
            regions,
            events,
            serializer,
            database,
        }
    }
}
