//! Error types for the step service.
//!
//! [`ServiceError`] unifies all failure modes into a single enum that can
//! be converted into an Axum HTTP response via its
//! [`IntoResponse`](axum::response::IntoResponse) implementation.
//!
//! Status mapping: compile and decode failures are the client's data or the
//! model's output, so they map to 422; backend transport failures map to
//! 502; template and configuration failures are server-side 500s.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use fable_grammar::{CompileError, DecodeError};

/// Errors that can occur in the step service layer.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// A configuration value was missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// A prompt template failed to load or render.
    #[error("template error: {0}")]
    Template(String),

    /// The LLM backend HTTP call failed or returned an unusable response.
    #[error("llm backend error: {0}")]
    Backend(String),

    /// The request's skills or entity snapshot could not be compiled into
    /// a constraint artifact.
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// The model's output could not be decoded into an action.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Compile(_) | Self::Decode(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Backend(_) => StatusCode::BAD_GATEWAY,
            Self::Config(_) | Self::Template(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = serde_json::json!({
            "error": self.to_string(),
            "status": status.as_u16(),
        });

        (status, axum::Json(body)).into_response()
    }
}
