pub mod envelope;
pub mod error;
pub mod fetcher;
pub mod handlers;
pub mod ical;
pub mod models;
pub mod normalize;
pub mod openapi;
pub mod pages;
pub mod settings;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{Router, routing::get};
use handlers::{events_ical, events_page, healthz_live, healthz_ready, index, list_events};
use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::fetcher::{ActivityFetcher, FetchError};
use crate::ical::ICalExporter;
use crate::normalize::EventNormalizer;
use crate::openapi::ApiDoc;
use crate::settings::Settings;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub fetcher: Arc<ActivityFetcher>,
    pub normalizer: Arc<EventNormalizer>,
    pub exporter: Arc<ICalExporter>,
}

impl AppState {
    pub fn from_settings(settings: Settings) -> Result<Self, FetchError> {
        let fetcher = ActivityFetcher::new(
            settings.upstream_url.clone(),
            &settings.session,
            &settings.search,
        )?;
        Ok(Self {
            normalizer: Arc::new(EventNormalizer::new(settings.activity_base_url.clone())),
            fetcher: Arc::new(fetcher),
            exporter: Arc::new(ICalExporter::new(settings.activity_base_url.clone())),
            settings,
        })
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::from_settings(settings)?;
    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!(upstream = %state.settings.upstream_url, "Starting outdoors activities on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    let mut router = Router::new()
        .route("/", get(index))
        .route("/events", get(events_page))
        .route("/events.ics", get(events_ical))
        .route("/api/events", get(list_events))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(trace_layer)
}
