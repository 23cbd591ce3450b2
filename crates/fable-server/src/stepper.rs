//! One NPC decision per call: compile, prompt, generate, decode.
//!
//! The stepper is the service's core loop body. Every step compiles a fresh
//! constraint artifact from the request's own skill list and entity
//! snapshot, renders the prompt, calls the backend once, and decodes the
//! response once. No retries, no caching across requests: the artifact and
//! the decode always see the same snapshot.

use fable_grammar::{compile_pattern, compile_schema};
use fable_types::Action;
use tracing::{debug, info};

use crate::error::ServiceError;
use crate::llm::{Constraint, LlmBackend};
use crate::prompt::PromptEngine;
use crate::wire::StepRequest;

/// Which constraint encoding the stepper compiles for each request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintMode {
    /// Guided-regex generation from the pattern encoding.
    Pattern,
    /// Guided-JSON generation from the schema encoding.
    Schema,
}

/// Executes one step: prompt assembly, constrained generation, decoding.
pub struct Stepper {
    prompts: PromptEngine,
    backend: LlmBackend,
    mode: ConstraintMode,
}

impl Stepper {
    /// Assemble a stepper from its parts.
    pub const fn new(prompts: PromptEngine, backend: LlmBackend, mode: ConstraintMode) -> Self {
        Self {
            prompts,
            backend,
            mode,
        }
    }

    /// Run one full decision for the request's protagonist.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Compile`]/[`ServiceError::Decode`] for
    /// grammar failures, [`ServiceError::Backend`] for transport failures,
    /// and [`ServiceError::Template`] for prompt failures.
    pub async fn step(&self, request: &StepRequest) -> Result<Action, ServiceError> {
        let catalog = request.catalog();
        let prompt = self.prompts.render(request)?;

        info!(
            protagonist = request.protagonist.name,
            backend = self.backend.name(),
            mode = ?self.mode,
            skills = request.protagonist.skills.len(),
            "stepping NPC"
        );

        let action = match self.mode {
            ConstraintMode::Pattern => {
                let pattern = compile_pattern(&request.protagonist.skills, &catalog)?;
                let raw = self
                    .backend
                    .complete(&prompt, &Constraint::Pattern(pattern.as_str().to_owned()))
                    .await?;
                debug!(raw, "model output");
                pattern.decode(&raw, &request.protagonist, &catalog)?
            }
            ConstraintMode::Schema => {
                let schema = compile_schema(&request.protagonist.skills, &catalog)?;
                let raw = self
                    .backend
                    .complete(&prompt, &Constraint::Schema(schema.to_json_schema()))
                    .await?;
                debug!(raw, "model output");
                schema.decode(&raw, &request.protagonist, &catalog)?
            }
        };

        info!(
            protagonist = action.protagonist.name,
            command = action.command,
            "step decoded"
        );
        Ok(action)
    }
}
