//! OpenAPI documentation configuration.
//!
//! Provides Swagger UI for API exploration and testing.

use utoipa::OpenApi;

use crate::api::handlers::{event_handler, region_handler};
use crate::domain::{
    Event, EventSummary, EventType, NewEvent, NewRegion, Region, UpdateEvent, UpdateRegion,
    YearParticipation,
};
use crate::types::{MessageResponse, PaginatedEvents, PaginationMeta};

/// OpenAPI documentation for the Paralympics API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Paralympics API",
        version = "0.1.0",
        description = "Regions and editions of the summer and winter paralympic games",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "http://localhost:5000", description = "Local development server")
    ),
    paths(
        // Region endpoints
        region_handler::list_regions,
        region_handler::create_region,
        region_handler::get_region,
        region_handler::update_region,
        region_handler::delete_region,
        region_handler::list_region_events,
        // Event endpoints
        event_handler::list_events,
        event_handler::event_summary,
        event_handler::create_event,
        event_handler::get_event,
        event_handler::update_event,
        event_handler::delete_event,
    ),
    components(
        schemas(
            Region,
            NewRegion,
            UpdateRegion,
            EventType,
            Event,
            NewEvent,
            UpdateEvent,
            EventSummary,
            YearParticipation,
            PaginatedEvents,
            PaginationMeta,
            MessageResponse,
        )
    ),
    tags(
        (name = "Regions", description = "National Paralympic Committee regions"),
        (name = "Events", description = "Paralympic games editions")
    )
)]
pub struct ApiDoc;
