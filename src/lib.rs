//! Library crate for minigames-back, exposing the session engine to binaries and tests.

/// Runtime configuration loading.
pub mod config;
/// Serializable request and response types.
pub mod dto;
/// Service and HTTP error types.
pub mod error;
/// axum route handlers.
pub mod routes;
/// Session, health, and documentation services.
pub mod services;
/// In-memory engine state.
pub mod state;
