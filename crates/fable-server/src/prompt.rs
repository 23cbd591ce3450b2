//! Prompt template loading and rendering via `minijinja`.
//!
//! Templates are loaded from the filesystem (default: `templates/`
//! directory) so operators can tune NPC behavior without recompiling. The
//! engine renders a [`StepRequest`] into the two-message prompt sent to the
//! LLM backend.

use minijinja::Environment;

use crate::error::ServiceError;
use crate::wire::StepRequest;

/// Manages prompt template loading and rendering.
///
/// Wraps a `minijinja` [`Environment`] with the step templates pre-loaded.
/// Templates can be edited on disk and will be picked up on the next call
/// to [`PromptEngine::new`].
pub struct PromptEngine {
    env: Environment<'static>,
}

/// The complete rendered prompt ready to send to an LLM backend.
#[derive(Debug, Clone)]
pub struct RenderedPrompt {
    /// System message establishing the NPC's reality.
    pub system: String,
    /// User message containing the scene, protagonist state, and allowed
    /// actions.
    pub user: String,
}

impl PromptEngine {
    /// Create a new prompt engine loading templates from the given
    /// directory.
    ///
    /// The directory must contain `system.j2` and `npc.j2`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Template`] if a template file cannot be read
    /// or fails to parse.
    pub fn new(templates_dir: &str) -> Result<Self, ServiceError> {
        let mut env = Environment::new();

        let system_tpl = load_template(templates_dir, "system.j2")?;
        let npc_tpl = load_template(templates_dir, "npc.j2")?;

        env.add_template_owned("system", system_tpl)
            .map_err(|e| ServiceError::Template(format!("failed to add system template: {e}")))?;
        env.add_template_owned("npc", npc_tpl)
            .map_err(|e| ServiceError::Template(format!("failed to add npc template: {e}")))?;

        Ok(Self { env })
    }

    /// Render the full prompt for one step.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Template`] if a template is missing or
    /// rendering fails.
    pub fn render(&self, request: &StepRequest) -> Result<RenderedPrompt, ServiceError> {
        let context = template_context(request);

        let system = self
            .env
            .get_template("system")
            .map_err(|e| ServiceError::Template(format!("missing system template: {e}")))?
            .render(&context)
            .map_err(|e| ServiceError::Template(format!("system render failed: {e}")))?;

        let user = self
            .env
            .get_template("npc")
            .map_err(|e| ServiceError::Template(format!("missing npc template: {e}")))?
            .render(&context)
            .map_err(|e| ServiceError::Template(format!("npc render failed: {e}")))?;

        Ok(RenderedPrompt { system, user })
    }
}

/// Flatten a step request into the value the templates render against.
///
/// Skill declarations and recent events are pre-rendered to their
/// single-line text forms; the templates only lay them out.
fn template_context(request: &StepRequest) -> serde_json::Value {
    let location_names: Vec<&str> = request.locations.iter().map(|l| l.name.as_str()).collect();
    let npc_names: Vec<&str> = request.npcs.iter().map(|c| c.name.as_str()).collect();
    let item_names: Vec<&str> = request.items.iter().map(|i| i.name.as_str()).collect();
    let events: Vec<String> = request.events.iter().map(ToString::to_string).collect();
    let skill_specs: Vec<String> = request
        .protagonist
        .skills
        .iter()
        .map(fable_types::Skill::render_spec)
        .collect();

    serde_json::json!({
        "context": request.context,
        "location_names": location_names,
        "npc_names": npc_names,
        "current_location": request.protagonist.current_location,
        "item_names": item_names,
        "events": events,
        "protagonist": request.protagonist,
        "skill_specs": skill_specs,
    })
}

/// Read a template file from disk.
fn load_template(dir: &str, filename: &str) -> Result<String, ServiceError> {
    let path = format!("{dir}/{filename}");
    std::fs::read_to_string(&path)
        .map_err(|e| ServiceError::Template(format!("failed to read {path}: {e}")))
}

#[cfg(test)]
mod tests {
    use fable_types::{Character, Location, ParameterKind, Protagonist, Skill};

    use super::*;

    fn write_test_templates(dir: &std::path::Path) {
        std::fs::write(
            dir.join("system.j2"),
            "You are {{ protagonist.name }}, an NPC in a game world.",
        )
        .ok();
        std::fs::write(
            dir.join("npc.j2"),
            "- WORLD KNOWLEDGE: {{ context }}\n- NPCS: {{ npc_names | join(', ') }}\n- ALLOWED ACTIONS:\n{% for spec in skill_specs %}{{ spec }}\n{% endfor %}{{ protagonist.name }}:",
        )
        .ok();
    }

    fn test_request() -> StepRequest {
        let old_town = Location {
            name: String::from("Old Town"),
            description: String::from("A quiet town."),
        };
        StepRequest {
            context: String::from("A medieval fantasy world."),
            locations: vec![old_town.clone()],
            npcs: vec![Character {
                name: String::from("John the Brave"),
                description: String::from("A fearless warrior"),
                current_location: old_town.clone(),
            }],
            protagonist: Protagonist {
                name: String::from("Aldren"),
                description: String::from("Brave and curious"),
                current_location: old_town,
                memories: Vec::new(),
                quests: Vec::new(),
                skills: vec![Skill {
                    name: String::from("attack"),
                    description: String::from("Attack a character."),
                    parameters: vec![ParameterKind::Character],
                }],
                psychological_profile: String::from("Determined"),
            },
            items: Vec::new(),
            events: Vec::new(),
        }
    }

    #[test]
    fn renders_scene_and_skill_specs() {
        let dir = std::env::temp_dir().join("fable-prompt-test");
        std::fs::create_dir_all(&dir).ok();
        write_test_templates(&dir);

        let rendered = PromptEngine::new(&dir.to_string_lossy())
            .and_then(|engine| engine.render(&test_request()));

        let user = rendered.map(|p| p.user).unwrap_or_default();
        assert!(user.contains("A medieval fantasy world."), "user: {user}");
        assert!(user.contains("John the Brave"), "user: {user}");
        assert!(
            user.contains("attack <character> : Attack a character."),
            "user: {user}"
        );
        assert!(user.trim_end().ends_with("Aldren:"), "user: {user}");
    }

    #[test]
    fn missing_templates_directory_is_a_template_error() {
        let result = PromptEngine::new("/nonexistent/fable-templates");
        assert!(matches!(result, Err(ServiceError::Template(_))));
    }
}
