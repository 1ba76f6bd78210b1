//! Domain layer - Core business entities and logic
//!
//! This module contains the paralympic models (regions and games
//! editions) and the payloads used to create and update them,
//! independent of persistence concerns.

pub mod event;
pub mod region;
pub mod summary;

pub use event::{Event, EventFilter, EventType, NewEvent, UpdateEvent};
pub use region::{NewRegion, Region, UpdateRegion};
pub use summary::{EventSummary, YearParticipation};
