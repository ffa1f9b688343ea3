use askama::Template;
use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};
use tracing::info;

use crate::{
    AppState,
    error::ApiError,
    models::EventRecord,
    pages::{EventsPage, IndexPage},
};

/// One uncached fetch + normalize cycle.
async fn load_events(state: &AppState) -> Result<Vec<EventRecord>, ApiError> {
    let response = state.fetcher.fetch().await?;
    let events = state.normalizer.normalize(&response)?;
    info!(count = events.len(), "loaded activities");
    Ok(events)
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Activity overview page", content_type = "text/html"),
        (status = 500, description = "Upstream request or response decoding failed")
    ),
    tag = "activities"
)]
pub async fn index(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = load_events(&state).await?;
    Ok(Html(IndexPage { events: &events }.render()?))
}

#[utoipa::path(
    get,
    path = "/events",
    responses(
        (status = 200, description = "Activity listing with descriptions", content_type = "text/html"),
        (status = 500, description = "Upstream request or response decoding failed")
    ),
    tag = "activities"
)]
pub async fn events_page(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = load_events(&state).await?;
    Ok(Html(EventsPage { events: &events }.render()?))
}

#[utoipa::path(
    get,
    path = "/api/events",
    responses(
        (status = 200, description = "List of activities", body = [EventRecord]),
        (status = 500, description = "Upstream request or response decoding failed")
    ),
    tag = "activities"
)]
pub async fn list_events(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    Ok(Json(load_events(&state).await?))
}

#[utoipa::path(
    get,
    path = "/events.ics",
    responses(
        (status = 200, description = "iCal file", content_type = "text/calendar"),
        (status = 500, description = "Upstream request or response decoding failed")
    ),
    tag = "activities"
)]
pub async fn events_ical(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let events = load_events(&state).await?;
    let body = state.exporter.generate(&events);
    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/calendar"),
            (
                "content-disposition",
                "attachment; filename=outdoors_activities.ics",
            ),
        ],
        body,
    ))
}

#[utoipa::path(get, path = "/healthz/live", tag = "health")]
pub async fn healthz_live() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

#[utoipa::path(get, path = "/healthz/ready", tag = "health")]
pub async fn healthz_ready() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}
