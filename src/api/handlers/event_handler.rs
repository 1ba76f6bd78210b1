//! Event handlers.

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::extractors::{ApiPath, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Event, EventFilter, EventSummary, EventType, NewEvent, UpdateEvent};
use crate::errors::{AppError, AppResult};
use crate::types::{MessageResponse, PaginatedEvents, PaginationParams};

/// Query parameters of the event listing
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListEventsQuery {
    /// Games season
    #[serde(rename = "type")]
    pub event_type: Option<EventType>,
    /// Games year
    #[param(example = 2012)]
    pub year: Option<i32>,
    /// Hosting region code
    #[param(example = "GBR")]
    pub noc: Option<String>,
    /// Page number, starting at 1
    pub page: Option<u64>,
    /// Items per page, at most 100
    pub per_page: Option<u64>,
}

impl ListEventsQuery {
    fn into_parts(self) -> AppResult<(EventFilter, PaginationParams)> {
        let pagination = PaginationParams::new(self.page, self.per_page);
        if pagination.offset().is_none() {
            return Err(AppError::BadRequest(format!(
                "page {} is out of range",
                pagination.page
            )));
        }

        let filter = EventFilter {
            event_type: self.event_type,
            year: self.year,
            noc: self.noc.map(|noc| noc.to_ascii_uppercase()),
        };
        Ok((filter, pagination))
    }
}

/// Create event routes
pub fn event_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/summary", get(event_summary))
        .route(
            "/:id",
            get(get_event).patch(update_event).delete(delete_event),
        )
}

/// List events, filtered and paginated
#[utoipa::path(
    get,
    path = "/events",
    tag = "Events",
    params(ListEventsQuery),
    responses(
        (status = 200, description = "One page of events", body = PaginatedEvents),
        (status = 400, description = "Invalid query")
    )
)]
pub async fn list_events(
    State(state): State<AppState>,
    query: Result<Query<ListEventsQuery>, QueryRejection>,
) -> AppResult<Response> {
    let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
    let (filter, pagination) = query.into_parts()?;

    let page = state.events.list_events(filter, pagination).await?;
    state.serializer.respond(StatusCode::OK, &page)
}

/// Aggregate statistics over all events
#[utoipa::path(
    get,
    path = "/events/summary",
    tag = "Events",
    responses(
        (status = 200, description = "Participation statistics", body = EventSummary)
    )
)]
pub async fn event_summary(State(state): State<AppState>) -> AppResult<Response> {
    let summary = state.events.summary().await?;
    state.serializer.respond(StatusCode::OK, &summary)
}

/// Create an event
#[utoipa::path(
    post,
    path = "/events",
    tag = "Events",
    request_body = NewEvent,
    responses(
        (status = 201, description = "Event created", body = Event),
        (status = 400, description = "Validation error or unknown NOC")
    )
)]
pub async fn create_event(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewEvent>,
) -> AppResult<Response> {
    let event = state.events.create_event(payload).await?;
    state.serializer.respond(StatusCode::CREATED, &event)
}

/// Get an event by ID
#[utoipa::path(
    get,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 404, description = "Event not found")
    )
)]
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Response> {
    let event = state.events.get_event(id).await?;
    state.serializer.respond(StatusCode::OK, &event)
}

/// Partially update an event
#[utoipa::path(
    patch,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = i32, Path, description = "Event ID")),
    request_body = UpdateEvent,
    responses(
        (status = 200, description = "Event updated", body = Event),
        (status = 400, description = "Validation error or unknown NOC"),
        (status = 404, description = "Event not found")
    )
)]
pub async fn update_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateEvent>,
) -> AppResult<Response> {
    let event = state.events.update_event(id, payload).await?;
    state.serializer.respond(StatusCode::OK, &event)
}

/// Delete an event
#[utoipa::path(
    delete,
    path = "/events/{id}",
    tag = "Events",
    params(("id" = i32, Path, description = "Event ID")),
    responses(
        (status = 200, description = "Event deleted", body = MessageResponse),
        (status = 404, description = "Event not found")
    )
)]
pub async fn delete_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> AppResult<Response> {
    state.events.delete_event(id).await?;
    state.serializer.respond(
        StatusCode::OK,
        &MessageResponse::new(format!("Event {} deleted", id)),
    )
}
