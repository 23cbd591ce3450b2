//! Axum router construction for the step API.
//!
//! Assembles all routes into a single [`Router`] with CORS middleware
//! enabled for cross-origin game-client access.

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::stepper::Stepper;

/// Build the complete Axum router for the step service.
///
/// The router includes:
/// - `POST /api/step` -- run one NPC decision
/// - `GET /health-check` -- liveness probe
///
/// CORS is configured to allow any origin for development. In
/// production this should be restricted.
pub fn build_router(stepper: Arc<Stepper>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/step", post(handlers::step))
        .route("/health-check", get(handlers::health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(stepper)
}
