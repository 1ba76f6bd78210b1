//! Application services layer - Use cases and business logic.
//!
//! Services orchestrate domain logic and infrastructure to fulfill
//! application use cases. They depend on abstractions (traits) for
//! dependency inversion.
//!
//! All services use Unit of Work pattern for centralized repository
//! access and transaction management.

pub mod container;
mod event_service;
mod import_service;
mod region_service;

// Service Container
pub use container::{ServiceContainer, Services};

// Service traits and implementations
pub use event_service::{EventManager, EventService};
pub use import_service::{DataImporter, Dataset, ImportReport, ImportService};
pub use region_service::{RegionManager, RegionService};
