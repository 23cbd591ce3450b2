//! Step service entry point.
//!
//! Initializes logging, loads configuration from environment variables,
//! loads prompt templates, sets up the LLM backend, and serves the step API
//! until terminated.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fable_server::config::ServiceConfig;
use fable_server::llm::create_backend;
use fable_server::prompt::PromptEngine;
use fable_server::server::start_server;
use fable_server::stepper::Stepper;

/// Application entry point.
///
/// # Errors
///
/// Returns an error if initialization fails or the server exits with a
/// fatal error.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("fable-server starting");

    // Load configuration from environment
    let config = ServiceConfig::from_env()?;
    info!(
        host = config.host,
        port = config.port,
        templates_dir = config.templates_dir,
        constraint_mode = ?config.constraint_mode,
        "configuration loaded"
    );

    // Load prompt templates
    let prompts = PromptEngine::new(&config.templates_dir)?;
    info!(
        templates_dir = config.templates_dir,
        "prompt templates loaded"
    );

    // Create the LLM backend
    let backend = create_backend(&config.backend);
    info!(
        backend = backend.name(),
        model = config.backend.model,
        "LLM backend configured"
    );

    let stepper = Arc::new(Stepper::new(prompts, backend, config.constraint_mode));

    start_server(&config, stepper).await?;

    Ok(())
}
