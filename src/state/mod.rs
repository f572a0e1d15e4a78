/// Grid shared by the board variants.
pub mod board;
/// Line and full-board detection.
pub mod detector;
/// Per-variant move validation and application.
pub mod rules;
/// Session data model.
pub mod session;
/// Concurrent per-variant session registry.
pub mod store;

use std::sync::Arc;

use crate::{
    config::AppConfig,
    state::{session::Variant, store::SessionStore},
};

/// Handle to the application state shared across handlers.
pub type SharedState = Arc<AppState>;

/// Central application state: one session store per variant and the runtime config.
pub struct AppState {
    config: AppConfig,
    gravity_four: SessionStore,
    free_placement_four: SessionStore,
    ring_constrained_four: SessionStore,
    pass_the_ball: SessionStore,
}

impl AppState {
    /// Construct a new [`AppState`] wrapped in an [`Arc`] so it can be cloned cheaply.
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(Self {
            config,
            gravity_four: SessionStore::new(Variant::GravityFour),
            free_placement_four: SessionStore::new(Variant::FreePlacementFour),
            ring_constrained_four: SessionStore::new(Variant::RingConstrainedFour),
            pass_the_ball: SessionStore::new(Variant::PassTheBall),
        })
    }

    /// Immutable runtime configuration.
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Store holding the sessions of `variant`.
    pub fn store(&self, variant: Variant) -> &SessionStore {
        match variant {
            Variant::GravityFour => &self.gravity_four,
            Variant::FreePlacementFour => &self.free_placement_four,
            Variant::RingConstrainedFour => &self.ring_constrained_four,
            Variant::PassTheBall => &self.pass_the_ball,
        }
    }
}
