use utoipa::OpenApi;

#[derive(OpenApi)]
/// Aggregated OpenAPI specification for the minigames backend.
#[openapi(
    paths(
        crate::routes::health::healthcheck,
        crate::routes::sessions::create_session,
        crate::routes::sessions::list_sessions,
        crate::routes::sessions::get_session,
        crate::routes::sessions::delete_session,
        crate::routes::sessions::submit_move,
    ),
    components(
        schemas(
            crate::dto::health::HealthResponse,
            crate::dto::health::SessionCounts,
            crate::dto::session::CreateSessionRequest,
            crate::dto::session::PlayerInput,
            crate::dto::session::CellInput,
            crate::dto::session::MoveRequest,
            crate::dto::session::SessionSummary,
            crate::dto::session::PlayerSummary,
            crate::dto::session::SeatSummary,
            crate::dto::session::StatusSummary,
            crate::state::session::Variant,
            crate::state::board::Mark,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "sessions", description = "Session lifecycle and moves for every game variant"),
    )
)]
pub struct ApiDoc;
