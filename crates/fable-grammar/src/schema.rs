//! The schema encoding: a tagged union of typed records, one variant per
//! skill.
//!
//! The artifact is an explicit in-memory description -- variant list, field
//! list, enumerated legal values -- built by a pure data-to-schema
//! transformation from the same skill definitions and catalog snapshot the
//! pattern encoding uses. [`ActionSchema::to_json_schema`] renders it as a
//! JSON Schema value for backends that support guided-JSON generation.
//!
//! Unlike the pattern encoding there is no alternation-order concern here:
//! the union is keyed by the explicit `command` discriminant, not by
//! positional matching. The payload shape mirrors the original wire format:
//! `{"action": {"command": "give_coins", "parameters": {"amount": 4}}}`.

use fable_types::catalog::names_match;
use fable_types::{EntityCatalog, EntityKind, ParameterKind, Skill};
use serde_json::{Value as JsonValue, json};

use crate::error::CompileError;
use crate::pattern::validate_skills;

/// The compiled schema constraint artifact.
///
/// Ephemeral: recompute whenever the skill list or catalog changes, since
/// the enumerated legal values are catalog-specific.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionSchema {
    /// One variant per skill, in skill-declaration order.
    pub variants: Vec<SkillVariant>,
}

/// One variant of the tagged union: a record type for a single skill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVariant {
    /// The discriminant: the skill name this variant is pinned to.
    pub command: String,
    /// Typed fields, one per parameter slot, in slot-declaration order.
    pub fields: Vec<SlotField>,
}

/// One typed field of a variant's parameters record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotField {
    /// Field name: the slot-kind tag, with `_{index}` appended when the
    /// skill declares that kind more than once (the same disambiguation
    /// pairing the pattern encoding uses for capture tags).
    pub name: String,
    /// The slot kind this field encodes.
    pub kind: ParameterKind,
    /// Enumerated legal values (lower-cased catalog entity names) for
    /// reference-typed slots; empty for `amount` and `content`.
    pub allowed: Vec<String>,
}

/// Compile the schema artifact for a protagonist's skills against a
/// catalog snapshot.
///
/// # Errors
///
/// Returns [`CompileError`] under the same structural preconditions as
/// [`compile_pattern`](crate::pattern::compile_pattern); both encodings
/// must stay consistent with their shared decoder rules.
pub fn compile_schema(
    skills: &[Skill],
    catalog: &EntityCatalog,
) -> Result<ActionSchema, CompileError> {
    validate_skills(skills)?;

    let variants = skills
        .iter()
        .map(|skill| skill_variant(skill, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ActionSchema { variants })
}

impl ActionSchema {
    /// Find the variant pinned to the given command, case-insensitively.
    pub(crate) fn variant(&self, command: &str) -> Option<&SkillVariant> {
        self.variants.iter().find(|v| names_match(&v.command, command))
    }

    /// Render the description as a JSON Schema value for guided-JSON
    /// backends.
    ///
    /// The union lives under a top-level `action` key (the shape the
    /// original game protocol settled on after `oneOf` at the root proved
    /// unreliable with constrained samplers).
    pub fn to_json_schema(&self) -> JsonValue {
        let variant_schemas: Vec<JsonValue> =
            self.variants.iter().map(variant_schema).collect();

        json!({
            "title": "Actions",
            "type": "object",
            "properties": {
                "action": { "anyOf": variant_schemas }
            },
            "required": ["action"],
            "additionalProperties": false
        })
    }
}

/// Build the record for one skill.
fn skill_variant(skill: &Skill, catalog: &EntityCatalog) -> Result<SkillVariant, CompileError> {
    let names = slot_field_names(&skill.parameters);
    let mut fields = Vec::with_capacity(skill.parameters.len());

    for (name, kind) in names.into_iter().zip(&skill.parameters) {
        let allowed = match kind {
            ParameterKind::Character => roster(skill, catalog, EntityKind::Character)?,
            ParameterKind::Location => roster(skill, catalog, EntityKind::Location)?,
            ParameterKind::Item => roster(skill, catalog, EntityKind::Item)?,
            ParameterKind::Amount | ParameterKind::Content => Vec::new(),
        };
        fields.push(SlotField {
            name,
            kind: *kind,
            allowed,
        });
    }

    Ok(SkillVariant {
        command: skill.name.clone(),
        fields,
    })
}

/// Lower-cased legal values for one reference-typed slot.
fn roster(
    skill: &Skill,
    catalog: &EntityCatalog,
    kind: EntityKind,
) -> Result<Vec<String>, CompileError> {
    let names = catalog.names(kind);
    if names.is_empty() {
        return Err(CompileError::EmptyRoster {
            skill: skill.name.clone(),
            kind,
        });
    }
    Ok(names.iter().map(|name| name.to_lowercase()).collect())
}

/// Field names for a slot list, in declaration order.
///
/// A kind declared once keeps its bare tag; a kind declared more than once
/// gets the slot index appended so the fields stay distinct. The decoder
/// applies the identical rule.
pub(crate) fn slot_field_names(parameters: &[ParameterKind]) -> Vec<String> {
    parameters
        .iter()
        .enumerate()
        .map(|(index, kind)| {
            let duplicated = parameters.iter().filter(|k| *k == kind).count() > 1;
            if duplicated {
                format!("{}_{index}", kind.tag())
            } else {
                kind.tag().to_owned()
            }
        })
        .collect()
}

/// JSON Schema for one variant.
fn variant_schema(variant: &SkillVariant) -> JsonValue {
    let mut properties = serde_json::Map::new();
    let mut required = Vec::with_capacity(variant.fields.len());

    for field in &variant.fields {
        properties.insert(field.name.clone(), field_schema(field));
        required.push(JsonValue::String(field.name.clone()));
    }

    json!({
        "type": "object",
        "properties": {
            "command": { "type": "string", "enum": [variant.command] },
            "parameters": {
                "type": "object",
                "properties": properties,
                "required": required,
                "additionalProperties": false
            }
        },
        "required": ["command", "parameters"],
        "additionalProperties": false
    })
}

/// JSON Schema for one field.
fn field_schema(field: &SlotField) -> JsonValue {
    match field.kind {
        ParameterKind::Character | ParameterKind::Location | ParameterKind::Item => {
            json!({ "type": "string", "enum": field.allowed })
        }
        ParameterKind::Amount => json!({ "type": "integer", "minimum": 0 }),
        ParameterKind::Content => json!({ "type": "string" }),
    }
}

#[cfg(test)]
mod tests {
    use fable_types::{Character, Item, Location};

    use super::*;

    fn catalog() -> EntityCatalog {
        let old_town = Location {
            name: String::from("Old Town"),
            description: String::from("A quiet and peaceful town."),
        };
        EntityCatalog::new(
            vec![Character {
                name: String::from("John the Brave"),
                description: String::from("A fearless warrior"),
                current_location: old_town.clone(),
            }],
            vec![old_town],
            vec![Item {
                name: String::from("Sword"),
                description: String::from("A sharp blade"),
            }],
        )
    }

    fn skill(name: &str, parameters: Vec<ParameterKind>) -> Skill {
        Skill {
            name: String::from(name),
            description: String::from("test skill"),
            parameters,
        }
    }

    #[test]
    fn single_kind_slots_keep_bare_field_names() {
        let names = slot_field_names(&[ParameterKind::Character, ParameterKind::Content]);
        assert_eq!(names, vec!["character", "content"]);
    }

    #[test]
    fn duplicated_kind_slots_get_indexed_field_names() {
        let names = slot_field_names(&[
            ParameterKind::Character,
            ParameterKind::Character,
            ParameterKind::Amount,
        ]);
        assert_eq!(names, vec!["character_0", "character_1", "amount"]);
    }

    #[test]
    fn allowed_values_are_lower_cased_catalog_names() {
        let skills = vec![skill("attack", vec![ParameterKind::Character])];
        let schema = compile_schema(&skills, &catalog());
        let allowed = schema
            .map(|s| {
                s.variants
                    .first()
                    .and_then(|v| v.fields.first())
                    .map(|f| f.allowed.clone())
                    .unwrap_or_default()
            })
            .unwrap_or_default();
        assert_eq!(allowed, vec!["john the brave"]);
    }

    #[test]
    fn json_schema_is_a_tagged_union_under_action() {
        let skills = vec![
            skill("attack", vec![ParameterKind::Character]),
            skill("give_coins", vec![ParameterKind::Amount]),
        ];
        let rendered = compile_schema(&skills, &catalog())
            .map(|s| s.to_json_schema())
            .unwrap_or_default();

        let variants = rendered
            .get("properties")
            .and_then(|p| p.get("action"))
            .and_then(|a| a.get("anyOf"))
            .and_then(JsonValue::as_array)
            .cloned()
            .unwrap_or_default();
        assert_eq!(variants.len(), 2);

        let first_command = variants
            .first()
            .and_then(|v| v.get("properties"))
            .and_then(|p| p.get("command"))
            .and_then(|c| c.get("enum"))
            .and_then(JsonValue::as_array)
            .and_then(|e| e.first())
            .and_then(JsonValue::as_str)
            .unwrap_or_default();
        assert_eq!(first_command, "attack");
    }

    #[test]
    fn empty_roster_is_rejected() {
        let skills = vec![skill("grab", vec![ParameterKind::Item])];
        let empty = EntityCatalog::default();
        assert!(matches!(
            compile_schema(&skills, &empty),
            Err(CompileError::EmptyRoster { .. })
        ));
    }
}
