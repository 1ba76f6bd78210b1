//! Repository layer - Data access abstraction
//!
//! Repositories provide an abstraction over data persistence,
//! following the Repository pattern for clean separation of concerns.

pub(crate) mod entities;
mod event_repository;
mod region_repository;

pub use event_repository::{EventRepository, EventStore};
pub use region_repository::{RegionRepository, RegionStore};

pub(crate) use event_repository::{edition_exists, insert_event};
pub(crate) use region_repository::{find_region, insert_region};

// Export mocks for tests (both unit and integration)
#[cfg(any(test, feature = "test-utils"))]
pub use event_repository::MockEventRepository;
#[cfg(any(test, feature = "test-utils"))]
pub use region_repository::MockRegionRepository;
