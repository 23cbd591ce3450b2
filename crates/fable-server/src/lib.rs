//! HTTP step API for LLM-driven NPC actions.
//!
//! This crate wraps the grammar engine in the service a game talks to:
//!
//! - **`POST /api/step`** -- take a scene snapshot, prompt an LLM under a
//!   compiled output constraint, decode the response, and return the typed
//!   [`Action`](fable_types::Action).
//! - **`GET /health-check`** -- liveness probe.
//!
//! # Architecture
//!
//! ```text
//! HTTP (scene) --> Prompt Engine --> LLM Backend --> Decoder --> HTTP (action)
//! ```
//!
//! The constraint artifact is compiled fresh for every request from the
//! request's own skill list and entity snapshot, so a stale artifact can
//! never decode against a newer scene. One decode attempt per step; every
//! failure maps to a typed HTTP error.

pub mod config;
pub mod error;
pub mod handlers;
pub mod llm;
pub mod prompt;
pub mod router;
pub mod server;
pub mod stepper;
pub mod wire;

// Re-export primary types for convenience.
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use stepper::{ConstraintMode, Stepper};
pub use wire::StepRequest;
