//! Region handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::Response,
    routing::get,
    Router,
};

use crate::api::extractors::{NocPath, ValidatedJson};
use crate::api::AppState;
use crate::domain::{Event, NewRegion, Region, UpdateRegion};
use crate::errors::AppResult;
use crate::types::MessageResponse;

/// Create region routes
pub fn region_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_regions).post(create_region))
        .route(
            "/:noc",
            get(get_region).patch(update_region).delete(delete_region),
        )
        .route("/:noc/events", get(list_region_events))
}

/// List all regions
#[utoipa::path(
    get,
    path = "/regions",
    tag = "Regions",
    responses(
        (status = 200, description = "Regions ordered by NOC", body = Vec<Region>)
    )
)]
pub async fn list_regions(State(state): State<AppState>) -> AppResult<Response> {
    let regions = state.regions.list_regions().await?;
    state.serializer.respond(StatusCode::OK, &regions)
}

/// Create a region
#[utoipa::path(
    post,
    path = "/regions",
    tag = "Regions",
    request_body = NewRegion,
    responses(
        (status = 201, description = "Region created", body = Region),
        (status = 400, description = "Validation error"),
        (status = 409, description = "Region already exists")
    )
)]
pub async fn create_region(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<NewRegion>,
) -> AppResult<Response> {
    let region = state.regions.create_region(payload).await?;
    state.serializer.respond(StatusCode::CREATED, &region)
}

/// Get a region by NOC code
#[utoipa::path(
    get,
    path = "/regions/{noc}",
    tag = "Regions",
    params(("noc" = String, Path, description = "NOC code", example = "GBR")),
    responses(
        (status = 200, description = "Region found", body = Region),
        (status = 404, description = "Region not found")
    )
)]
pub async fn get_region(
    State(state): State<AppState>,
    NocPath(noc): NocPath,
) -> AppResult<Response> {
    let region = state.regions.get_region(&noc).await?;
    state.serializer.respond(StatusCode::OK, &region)
}

/// Update name or notes of a region
#[utoipa::path(
    patch,
    path = "/regions/{noc}",
    tag = "Regions",
    params(("noc" = String, Path, description = "NOC code")),
    request_body = UpdateRegion,
    responses(
        (status = 200, description = "Region updated", body = Region),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Region not found")
    )
)]
pub async fn update_region(
    State(state): State<AppState>,
    NocPath(noc): NocPath,
    ValidatedJson(payload): ValidatedJson<UpdateRegion>,
) -> AppResult<Response> {
    let region = state.regions.update_region(&noc, payload).await?;
    state.serializer.respond(StatusCode::OK, &region)
}

/// Delete a region no event refers to
#[utoipa::path(
    delete,
    path = "/regions/{noc}",
    tag = "Regions",
    params(("noc" = String, Path, description = "NOC code")),
    responses(
        (status = 200, description = "Region deleted", body = MessageResponse),
        (status = 404, description = "Region not found"),
        (status = 409, description = "Region is referenced by events")
    )
)]
pub async fn delete_region(
    State(state): State<AppState>,
    NocPath(noc): NocPath,
) -> AppResult<Response> {
    state.regions.delete_region(&noc).await?;
    state.serializer.respond(
        StatusCode::OK,
        &MessageResponse::new(format!("Region {} deleted", noc)),
    )
}

/// List the events hosted by a region
#[utoipa::path(
    get,
    path = "/regions/{noc}/events",
    tag = "Regions",
    params(("noc" = String, Path, description = "NOC code")),
    responses(
        (status = 200, description = "Events hosted by the region", body = Vec<Event>),
        (status = 404, description = "Region not found")
    )
)]
pub async fn list_region_events(
    State(state): State<AppState>,
    NocPath(noc): NocPath,
) -> AppResult<Response> {
    let events = state.events.events_by_region(&noc).await?;
    state.serializer.respond(StatusCode::OK, &events)
}
