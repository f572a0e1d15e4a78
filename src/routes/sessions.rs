use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    dto::session::{CreateSessionRequest, MoveRequest, SessionSummary},
    error::AppError,
    services::session_service,
    state::{SharedState, session::Variant},
};

/// Session lifecycle and move submission for every game variant.
pub fn router() -> Router<SharedState> {
    Router::new()
        .route(
            "/games/{variant}/sessions",
            get(list_sessions).post(create_session),
        )
        .route(
            "/games/{variant}/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route("/games/{variant}/sessions/{id}/moves", post(submit_move))
}

/// Open a new session of the given variant.
#[utoipa::path(
    post,
    path = "/games/{variant}/sessions",
    tag = "sessions",
    params(("variant" = Variant, Path, description = "Game variant")),
    request_body = CreateSessionRequest,
    responses(
        (status = 201, description = "Session created", body = SessionSummary),
        (status = 400, description = "Invalid player list")
    )
)]
pub async fn create_session(
    State(state): State<SharedState>,
    Path(variant): Path<Variant>,
    Json(payload): Json<CreateSessionRequest>,
) -> Result<(StatusCode, Json<SessionSummary>), AppError> {
    payload.validate()?;
    let summary = session_service::create_session(&state, variant, payload).await?;
    Ok((StatusCode::CREATED, Json(summary)))
}

/// List live sessions of the given variant, newest first.
#[utoipa::path(
    get,
    path = "/games/{variant}/sessions",
    tag = "sessions",
    params(("variant" = Variant, Path, description = "Game variant")),
    responses((status = 200, description = "Live sessions", body = [SessionSummary]))
)]
pub async fn list_sessions(
    State(state): State<SharedState>,
    Path(variant): Path<Variant>,
) -> Json<Vec<SessionSummary>> {
    Json(session_service::list_sessions(&state, variant).await)
}

/// Retrieve a session snapshot.
#[utoipa::path(
    get,
    path = "/games/{variant}/sessions/{id}",
    tag = "sessions",
    params(
        ("variant" = Variant, Path, description = "Game variant"),
        ("id" = String, Path, description = "Session identifier")
    ),
    responses(
        (status = 200, description = "Session snapshot", body = SessionSummary),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn get_session(
    State(state): State<SharedState>,
    Path((variant, id)): Path<(Variant, Uuid)>,
) -> Result<Json<SessionSummary>, AppError> {
    Ok(Json(session_service::get_session(&state, variant, id).await?))
}

/// Terminate a session and drop it from the store.
#[utoipa::path(
    delete,
    path = "/games/{variant}/sessions/{id}",
    tag = "sessions",
    params(
        ("variant" = Variant, Path, description = "Game variant"),
        ("id" = String, Path, description = "Session identifier")
    ),
    responses(
        (status = 204, description = "Session terminated"),
        (status = 404, description = "Unknown session")
    )
)]
pub async fn delete_session(
    State(state): State<SharedState>,
    Path((variant, id)): Path<(Variant, Uuid)>,
) -> Result<StatusCode, AppError> {
    session_service::terminate_session(&state, variant, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Submit a move. Required fields depend on the variant.
#[utoipa::path(
    post,
    path = "/games/{variant}/sessions/{id}/moves",
    tag = "sessions",
    params(
        ("variant" = Variant, Path, description = "Game variant"),
        ("id" = String, Path, description = "Session identifier")
    ),
    request_body = MoveRequest,
    responses(
        (status = 200, description = "Move applied", body = SessionSummary),
        (status = 400, description = "Invalid or illegal move"),
        (status = 404, description = "Unknown session"),
        (status = 409, description = "Session already finished")
    )
)]
pub async fn submit_move(
    State(state): State<SharedState>,
    Path((variant, id)): Path<(Variant, Uuid)>,
    Json(payload): Json<MoveRequest>,
) -> Result<Json<SessionSummary>, AppError> {
    payload.validate()?;
    Ok(Json(
        session_service::apply_move(&state, variant, id, payload).await?,
    ))
}
