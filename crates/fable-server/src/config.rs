//! Configuration types for the step service.
//!
//! All configuration is loaded from environment variables. The service needs
//! to know where to bind, which LLM backend to use (with its URL, API key,
//! and model name), where the prompt templates live, and which constraint
//! encoding to compile per step.

use crate::error::ServiceError;
use crate::stepper::ConstraintMode;

/// Complete service configuration loaded from the environment.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// The host address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// The TCP port to listen on.
    pub port: u16,
    /// LLM backend configuration.
    pub backend: LlmBackendConfig,
    /// Path to the templates directory.
    pub templates_dir: String,
    /// Which constraint encoding to compile for each step.
    pub constraint_mode: ConstraintMode,
}

/// Configuration for a single LLM backend.
#[derive(Debug, Clone)]
pub struct LlmBackendConfig {
    /// The backend type (openai-compatible or anthropic).
    pub backend_type: BackendType,
    /// Base API URL (e.g. `https://api.openai.com/v1`).
    pub api_url: String,
    /// API key for authentication.
    pub api_key: String,
    /// Model identifier.
    pub model: String,
}

/// Supported LLM backend types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendType {
    /// `OpenAI`-compatible API. `vLLM` endpoints additionally honor the
    /// guided-decoding constraint fields.
    OpenAi,
    /// Anthropic Messages API (different request format, no guided
    /// decoding; output is validated at decode time only).
    Anthropic,
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Required variables:
    /// - `LLM_BACKEND` -- backend type (`openai`, `vllm`, `ollama`, `anthropic`)
    /// - `LLM_API_URL` -- API base URL
    /// - `LLM_API_KEY` -- API key
    /// - `LLM_MODEL` -- model name
    ///
    /// Optional variables:
    /// - `FABLE_HOST` -- bind address (default `0.0.0.0`)
    /// - `FABLE_PORT` -- listen port (default 8080)
    /// - `TEMPLATES_DIR` -- path to prompt templates (default `templates`)
    /// - `CONSTRAINT_MODE` -- `pattern` or `schema` (default `pattern`)
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if a required variable is missing
    /// or a value fails to parse.
    pub fn from_env() -> Result<Self, ServiceError> {
        let host = std::env::var("FABLE_HOST").unwrap_or_else(|_| "0.0.0.0".to_owned());

        let port: u16 = std::env::var("FABLE_PORT")
            .unwrap_or_else(|_| "8080".to_owned())
            .parse()
            .map_err(|e| ServiceError::Config(format!("invalid FABLE_PORT: {e}")))?;

        let backend = load_backend_config()?;

        let templates_dir =
            std::env::var("TEMPLATES_DIR").unwrap_or_else(|_| "templates".to_owned());

        let constraint_mode = match std::env::var("CONSTRAINT_MODE")
            .unwrap_or_else(|_| "pattern".to_owned())
            .to_lowercase()
            .as_str()
        {
            "pattern" | "regex" => ConstraintMode::Pattern,
            "schema" | "json" => ConstraintMode::Schema,
            other => {
                return Err(ServiceError::Config(format!(
                    "unknown CONSTRAINT_MODE: {other}"
                )));
            }
        };

        Ok(Self {
            host,
            port,
            backend,
            templates_dir,
            constraint_mode,
        })
    }
}

/// Read a required environment variable.
fn env_var(name: &str) -> Result<String, ServiceError> {
    std::env::var(name)
        .map_err(|e| ServiceError::Config(format!("missing required env var {name}: {e}")))
}

/// Load the LLM backend config from its environment variables.
fn load_backend_config() -> Result<LlmBackendConfig, ServiceError> {
    let backend_str = env_var("LLM_BACKEND")?;
    let api_url = env_var("LLM_API_URL")?;
    let api_key = env_var("LLM_API_KEY")?;
    let model = env_var("LLM_MODEL")?;

    let backend_type = match backend_str.to_lowercase().as_str() {
        "openai" | "vllm" | "ollama" => BackendType::OpenAi,
        "anthropic" | "claude" => BackendType::Anthropic,
        other => {
            return Err(ServiceError::Config(format!(
                "unknown backend type: {other}"
            )));
        }
    };

    Ok(LlmBackendConfig {
        backend_type,
        api_url,
        api_key,
        model,
    })
}
