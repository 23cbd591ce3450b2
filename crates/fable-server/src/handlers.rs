//! HTTP endpoint handlers for the step service.
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `POST` | `/api/step` | Run one NPC decision |
//! | `GET` | `/health-check` | Liveness probe |

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use fable_types::Action;

use crate::error::ServiceError;
use crate::stepper::Stepper;
use crate::wire::StepRequest;

/// Run one NPC decision for the posted scene snapshot.
///
/// Returns the decoded [`Action`] as JSON. Grammar failures map to 422,
/// backend failures to 502, template failures to 500.
pub async fn step(
    State(stepper): State<Arc<Stepper>>,
    Json(request): Json<StepRequest>,
) -> Result<Json<Action>, ServiceError> {
    let action = stepper.step(&request).await?;
    Ok(Json(action))
}

/// Liveness probe.
pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}
