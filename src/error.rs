use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::state::{
    rules::{IllegalMove, InvalidMove, RuleError},
    session::SessionStatus,
};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Requested session was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Invalid input provided by the client.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// Move payload is malformed or out of range.
    #[error("invalid move: {0}")]
    InvalidMove(InvalidMove),
    /// Move breaks the rules of the variant.
    #[error("illegal move: {0}")]
    IllegalMove(IllegalMove),
    /// Session no longer accepts moves.
    #[error("session is over ({0})")]
    SessionTerminal(SessionStatus),
    /// Engine invariant violated; indicates a bug.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<RuleError> for ServiceError {
    fn from(err: RuleError) -> Self {
        match err {
            RuleError::Invalid(invalid) => ServiceError::InvalidMove(invalid),
            RuleError::Illegal(illegal) => ServiceError::IllegalMove(illegal),
            RuleError::Corrupted(message) => ServiceError::Internal(message),
        }
    }
}

impl From<InvalidMove> for ServiceError {
    fn from(err: InvalidMove) -> Self {
        ServiceError::InvalidMove(err)
    }
}

impl From<ValidationErrors> for AppError {
    fn from(err: ValidationErrors) -> Self {
        AppError::BadRequest(format!("validation failed: {}", err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    /// Bad request with invalid input.
    #[error("bad request: {0}")]
    BadRequest(String),
    /// Requested resource not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// Conflict with current state.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::NotFound(message) => AppError::NotFound(message),
            ServiceError::InvalidInput(message) => AppError::BadRequest(message),
            ServiceError::InvalidMove(invalid) => AppError::BadRequest(invalid.to_string()),
            ServiceError::IllegalMove(illegal) => AppError::BadRequest(illegal.to_string()),
            err @ ServiceError::SessionTerminal(_) => AppError::Conflict(err.to_string()),
            ServiceError::Internal(message) => AppError::Internal(message),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let payload = Json(ErrorBody {
            message: self.to_string(),
        });

        (status, payload).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rule_errors_map_onto_the_service_taxonomy() {
        assert!(matches!(
            ServiceError::from(RuleError::Illegal(IllegalMove::MustUseOuterRing)),
            ServiceError::IllegalMove(IllegalMove::MustUseOuterRing)
        ));
        assert!(matches!(
            ServiceError::from(RuleError::Invalid(InvalidMove::OriginRequired)),
            ServiceError::InvalidMove(InvalidMove::OriginRequired)
        ));
        assert!(matches!(
            ServiceError::from(RuleError::Corrupted("boom".into())),
            ServiceError::Internal(message) if message == "boom"
        ));
    }

    #[test]
    fn service_errors_pick_the_expected_status_codes() {
        let cases = [
            (ServiceError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServiceError::InvalidInput("x".into()), StatusCode::BAD_REQUEST),
            (
                ServiceError::IllegalMove(IllegalMove::ColumnFull { column: 2 }),
                StatusCode::BAD_REQUEST,
            ),
            (
                ServiceError::SessionTerminal(SessionStatus::Drawn),
                StatusCode::CONFLICT,
            ),
            (
                ServiceError::Internal("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, expected) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn terminal_status_reads_naturally_in_messages() {
        let err = AppError::from(ServiceError::SessionTerminal(SessionStatus::Won {
            winner: "p1".into(),
        }));
        assert_eq!(err.to_string(), "conflict: session is over (won by p1)");

        let drawn = ServiceError::SessionTerminal(SessionStatus::Drawn);
        assert_eq!(drawn.to_string(), "session is over (drawn)");
    }
}
