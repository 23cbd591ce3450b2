//! Decoding constrained model output back into typed actions.
//!
//! Both decode paths take the same `(protagonist, catalog)` snapshot that
//! compiled the artifact. Values are extracted in slot-declaration order --
//! never in group- or field-iteration order, which is container-dependent --
//! so decoded parameter order is deterministic. Every failure is a typed
//! [`DecodeError`]; no partially populated action ever escapes.

use fable_types::catalog::names_match;
use fable_types::{
    Action, EntityCatalog, EntityKind, ParameterKind, Protagonist, Value,
};
use serde_json::Value as JsonValue;

use crate::error::DecodeError;
use crate::pattern::{ActionPattern, capture_tag};
use crate::schema::ActionSchema;

impl ActionPattern {
    /// Decode raw constrained text into an [`Action`].
    ///
    /// Steps:
    /// 1. Anchored match against the compiled pattern.
    /// 2. Identify the matched alternative by which named groups
    ///    *participated* in the match -- presence, not non-emptiness, so a
    ///    captured `0` amount or empty content is never dropped. A matched
    ///    alternative with no groups at all (a zero-slot skill) is
    ///    identified by the matched literal text instead.
    /// 3. The recovered command must name one of the protagonist's skills.
    /// 4. Extract and resolve one value per slot, in declared order.
    ///
    /// # Errors
    ///
    /// [`DecodeError::Malformed`] if the text does not match or a value
    /// fails to convert; [`DecodeError::UnknownCommand`] if the matched
    /// skill is not in the protagonist's list;
    /// [`DecodeError::UnknownReference`] if an entity name has no catalog
    /// entry.
    pub fn decode(
        &self,
        text: &str,
        protagonist: &Protagonist,
        catalog: &EntityCatalog,
    ) -> Result<Action, DecodeError> {
        let caps = self.regex().captures(text).ok_or_else(|| {
            DecodeError::Malformed(format!(
                "output does not match any skill alternative: `{text}`"
            ))
        })?;

        let mut command = None;
        for group in self.regex().capture_names().flatten() {
            if caps.name(group).is_some()
                && let Some(recovered) = command_from_tag(group)
            {
                command = Some(recovered.to_owned());
                break;
            }
        }
        // Zero-slot skills compile to a bare literal with no groups; the
        // whole match is then the command itself.
        let literal = caps.get(0).map(|m| m.as_str().trim().to_owned());
        let command = command.or(literal).ok_or_else(|| {
            DecodeError::Malformed(String::from("matched output has no identifiable skill"))
        })?;

        let skill = protagonist
            .skills
            .iter()
            .find(|s| names_match(&s.name, &command))
            .ok_or_else(|| DecodeError::UnknownCommand(command.clone()))?;

        let mut parameters = Vec::with_capacity(skill.parameters.len());
        for (index, kind) in skill.parameters.iter().enumerate() {
            let tag = capture_tag(&skill.name, *kind, index);
            let captured = caps
                .name(&tag)
                .ok_or_else(|| {
                    DecodeError::Malformed(format!("missing capture group `{tag}`"))
                })?
                .as_str();
            parameters.push(resolve_text_slot(*kind, captured, catalog)?);
        }

        Ok(Action {
            command: skill.name.clone(),
            protagonist: protagonist.character(),
            parameters,
        })
    }
}

impl ActionSchema {
    /// Decode a raw structured payload into an [`Action`].
    ///
    /// The payload is validated here against the compiled description --
    /// backends that return raw structured text may not have validated it
    /// themselves. Fields are read in slot-declaration order via the
    /// variant's field names, never the payload's native field order.
    ///
    /// # Errors
    ///
    /// Same taxonomy as the pattern path: [`DecodeError::Malformed`] for
    /// shape or numeric failures, [`DecodeError::UnknownCommand`] for a
    /// command outside the protagonist's skill list,
    /// [`DecodeError::UnknownReference`] for unresolvable entity names.
    pub fn decode(
        &self,
        raw: &str,
        protagonist: &Protagonist,
        catalog: &EntityCatalog,
    ) -> Result<Action, DecodeError> {
        let payload: JsonValue = serde_json::from_str(raw)
            .map_err(|e| DecodeError::Malformed(format!("invalid JSON payload: {e}")))?;

        let action = payload
            .get("action")
            .ok_or_else(|| DecodeError::Malformed(String::from("payload missing `action`")))?;

        let command = action
            .get("command")
            .and_then(JsonValue::as_str)
            .ok_or_else(|| {
                DecodeError::Malformed(String::from("`action.command` must be a string"))
            })?;

        let skill = protagonist
            .skills
            .iter()
            .find(|s| names_match(&s.name, command))
            .ok_or_else(|| DecodeError::UnknownCommand(command.to_owned()))?;

        let variant = self.variant(&skill.name).ok_or_else(|| {
            DecodeError::Malformed(format!(
                "command `{command}` is not in the compiled schema"
            ))
        })?;

        let mut parameters = Vec::with_capacity(skill.parameters.len());
        if skill.parameters.is_empty() {
            return Ok(Action {
                command: skill.name.clone(),
                protagonist: protagonist.character(),
                parameters,
            });
        }

        let fields = action
            .get("parameters")
            .and_then(JsonValue::as_object)
            .ok_or_else(|| {
                DecodeError::Malformed(String::from("`action.parameters` must be an object"))
            })?;

        for (field, kind) in variant.fields.iter().zip(&skill.parameters) {
            let value = fields.get(&field.name).ok_or_else(|| {
                DecodeError::Malformed(format!("missing parameter field `{}`", field.name))
            })?;
            parameters.push(resolve_json_field(*kind, &field.name, value, catalog)?);
        }

        Ok(Action {
            command: skill.name.clone(),
            protagonist: protagonist.character(),
            parameters,
        })
    }
}

/// Convert one captured pattern-path value into a resolved [`Value`].
fn resolve_text_slot(
    kind: ParameterKind,
    raw: &str,
    catalog: &EntityCatalog,
) -> Result<Value, DecodeError> {
    match kind {
        ParameterKind::Character => catalog
            .character(raw)
            .cloned()
            .map(Value::Character)
            .ok_or_else(|| unknown(EntityKind::Character, raw)),
        ParameterKind::Location => catalog
            .location(raw)
            .cloned()
            .map(Value::Location)
            .ok_or_else(|| unknown(EntityKind::Location, raw)),
        ParameterKind::Item => catalog
            .item(raw)
            .cloned()
            .map(Value::Item)
            .ok_or_else(|| unknown(EntityKind::Item, raw)),
        ParameterKind::Amount => raw.parse::<u32>().map(Value::Amount).map_err(|e| {
            DecodeError::Malformed(format!("amount `{raw}` does not fit: {e}"))
        }),
        ParameterKind::Content => strip_quotes(raw).map(|s| Value::Text(s.to_owned())),
    }
}

/// Convert one schema-path JSON field into a resolved [`Value`].
///
/// `content` needs no quote stripping here: quotes are structural JSON
/// delimiters in this encoding, unlike the pattern encoding where they are
/// part of the matched text.
fn resolve_json_field(
    kind: ParameterKind,
    name: &str,
    value: &JsonValue,
    catalog: &EntityCatalog,
) -> Result<Value, DecodeError> {
    match kind {
        ParameterKind::Character | ParameterKind::Location | ParameterKind::Item => {
            let raw = value.as_str().ok_or_else(|| {
                DecodeError::Malformed(format!("field `{name}` must be a string"))
            })?;
            resolve_text_slot(kind, raw, catalog)
        }
        ParameterKind::Amount => {
            let wide = value.as_u64().ok_or_else(|| {
                DecodeError::Malformed(format!("field `{name}` must be a non-negative integer"))
            })?;
            u32::try_from(wide).map(Value::Amount).map_err(|e| {
                DecodeError::Malformed(format!("field `{name}` does not fit: {e}"))
            })
        }
        ParameterKind::Content => value
            .as_str()
            .map(|s| Value::Text(s.to_owned()))
            .ok_or_else(|| DecodeError::Malformed(format!("field `{name}` must be a string"))),
    }
}

/// Strip exactly one leading and one trailing double quote.
fn strip_quotes(raw: &str) -> Result<&str, DecodeError> {
    raw.strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| {
            DecodeError::Malformed(format!("content `{raw}` is not double-quoted"))
        })
}

/// Recover the skill name from a capture-group tag of the form
/// `{skill}_{kind}_{index}`.
///
/// Returns `None` for anything that does not end in a known kind tag plus a
/// numeric index -- callers treat such groups as not identifying a skill.
fn command_from_tag(tag: &str) -> Option<&str> {
    let (rest, index) = tag.rsplit_once('_')?;
    if index.is_empty() || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let (skill, kind_tag) = rest.rsplit_once('_')?;
    let known_kind = ParameterKind::ALL.iter().any(|k| k.tag() == kind_tag);
    (known_kind && !skill.is_empty()).then_some(skill)
}

fn unknown(kind: EntityKind, name: &str) -> DecodeError {
    DecodeError::UnknownReference {
        kind,
        name: name.to_owned(),
    }
}
