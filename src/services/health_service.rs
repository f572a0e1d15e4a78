use tracing::debug;

use crate::{
    dto::health::{HealthResponse, SessionCounts},
    state::{SharedState, session::Variant},
};

/// Report liveness along with the number of sessions held by each store.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let sessions = SessionCounts {
        gravity_four: state.store(Variant::GravityFour).len(),
        free_placement_four: state.store(Variant::FreePlacementFour).len(),
        ring_constrained_four: state.store(Variant::RingConstrainedFour).len(),
        pass_the_ball: state.store(Variant::PassTheBall).len(),
    };
    debug!(?sessions, "health probe");

    HealthResponse::ok(sessions)
}
