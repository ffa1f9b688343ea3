use utoipa::OpenApi;

use crate::models::EventRecord;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::index,
        crate::handlers::events_page,
        crate::handlers::list_events,
        crate::handlers::events_ical,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready
    ),
    components(schemas(EventRecord)),
    tags(
        (name = "activities", description = "outdoors.org activity listings"),
        (name = "health", description = "Liveness and readiness probes")
    ),
)]
pub struct ApiDoc;
