use serde::Serialize;
use utoipa::ToSchema;

/// Simple health response returned by the `/healthcheck` route.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Health status (always "ok" while the process serves requests).
    pub status: String,
    /// Live sessions per variant.
    pub sessions: SessionCounts,
}

/// Number of live sessions held by each store.
#[derive(Debug, Default, Serialize, ToSchema, PartialEq, Eq)]
pub struct SessionCounts {
    /// Live gravity-four sessions.
    pub gravity_four: usize,
    /// Live free-placement-four sessions.
    pub free_placement_four: usize,
    /// Live ring-constrained-four sessions.
    pub ring_constrained_four: usize,
    /// Live pass-the-ball sessions.
    pub pass_the_ball: usize,
}

impl HealthResponse {
    /// Create a health response indicating the system is operational.
    pub fn ok(sessions: SessionCounts) -> Self {
        Self {
            status: "ok".to_string(),
            sessions,
        }
    }
}
