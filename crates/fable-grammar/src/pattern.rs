//! The pattern encoding: one case-insensitive regex covering every skill
//! as a mutually exclusive alternative.
//!
//! Per skill, the sub-pattern is the escaped literal skill name followed by
//! one matcher per parameter slot, slots separated by mandatory whitespace.
//! Reference-typed slots become a capturing alternation of every catalog
//! entity name of that kind, each name regex-escaped exactly. Every
//! capturing group is tagged `{skill_name}_{slot_kind}_{index}` so the
//! decoder can recover both the skill that fired and each slot's value from
//! named groups alone.
//!
//! Alternation order matters: the regex engine picks the first alternative
//! that matches, so skills are sorted by descending name length (ties keep
//! declaration order) before joining. Entity names inside a group are
//! sorted the same way so a name that prefixes another cannot shadow it.

use fable_types::catalog::names_match;
use fable_types::{EntityCatalog, EntityKind, ParameterKind, Skill};
use regex::Regex;

use crate::error::CompileError;

/// The compiled pattern constraint artifact.
///
/// Ephemeral: recompute whenever the skill list or catalog changes. The
/// guided-generation source exposed by [`ActionPattern::as_str`] carries
/// its case-insensitivity inline, so a backend can use it verbatim.
#[derive(Debug)]
pub struct ActionPattern {
    source: String,
    regex: Regex,
}

impl ActionPattern {
    /// The pattern source handed to a guided-generation backend.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// The compiled, start-anchored form used by the decoder.
    pub(crate) const fn regex(&self) -> &Regex {
        &self.regex
    }
}

/// Compile the pattern artifact for a protagonist's skills against a
/// catalog snapshot.
///
/// # Errors
///
/// Returns [`CompileError`] if the skill list is empty, a skill name is not
/// a valid command identifier, two skills share a name, or a reference-typed
/// slot has an empty roster in the catalog.
pub fn compile_pattern(
    skills: &[Skill],
    catalog: &EntityCatalog,
) -> Result<ActionPattern, CompileError> {
    validate_skills(skills)?;

    // Longest names first; the sort is stable so ties keep declaration
    // order. Prevents `attack` from shadowing `attack_heavy`.
    let mut ordered: Vec<&Skill> = skills.iter().collect();
    ordered.sort_by(|a, b| b.name.len().cmp(&a.name.len()));

    let fragments = ordered
        .iter()
        .map(|skill| skill_fragment(skill, catalog))
        .collect::<Result<Vec<_>, _>>()?;

    let source = format!("(?i:{})", fragments.join("|"));
    let regex = Regex::new(&format!("^{source}"))
        .map_err(|e| CompileError::Pattern(e.to_string()))?;

    Ok(ActionPattern { source, regex })
}

/// The capture-group tag for one slot: `{skill_name}_{slot_kind}_{index}`.
///
/// The index is always appended, so skills with two slots of the same kind
/// stay unambiguous. The decoder strips the same suffix to recover the
/// skill name; kind tags and indices contain no underscores, so skill names
/// containing underscores survive the round trip.
pub(crate) fn capture_tag(skill_name: &str, kind: ParameterKind, index: usize) -> String {
    format!("{skill_name}_{}_{index}", kind.tag())
}

/// Build the sub-pattern for one skill.
fn skill_fragment(skill: &Skill, catalog: &EntityCatalog) -> Result<String, CompileError> {
    let mut parts = vec![regex::escape(&skill.name)];

    for (index, kind) in skill.parameters.iter().enumerate() {
        let matcher = match kind {
            ParameterKind::Character => {
                entity_alternation(skill, catalog, EntityKind::Character)?
            }
            ParameterKind::Location => entity_alternation(skill, catalog, EntityKind::Location)?,
            ParameterKind::Item => entity_alternation(skill, catalog, EntityKind::Item)?,
            ParameterKind::Amount => String::from(r"\d+"),
            ParameterKind::Content => String::from(r#""[^"]*""#),
        };
        let tag = capture_tag(&skill.name, *kind, index);
        parts.push(format!("(?P<{tag}>{matcher})"));
    }

    Ok(parts.join(r"\s+"))
}

/// Build the escaped name alternation for one reference-typed slot.
fn entity_alternation(
    skill: &Skill,
    catalog: &EntityCatalog,
    kind: EntityKind,
) -> Result<String, CompileError> {
    let mut names = catalog.names(kind);
    if names.is_empty() {
        return Err(CompileError::EmptyRoster {
            skill: skill.name.clone(),
            kind,
        });
    }

    // Longer names first so a name that prefixes another cannot shadow it.
    names.sort_by(|a, b| b.len().cmp(&a.len()));

    Ok(names
        .iter()
        .map(|name| regex::escape(name))
        .collect::<Vec<_>>()
        .join("|"))
}

/// Structural validation shared by both constraint encodings.
///
/// Both encodings build their tags and discriminants from skill names, so
/// they enforce the same preconditions and stay byte-for-byte consistent
/// with their paired decode path.
pub(crate) fn validate_skills(skills: &[Skill]) -> Result<(), CompileError> {
    if skills.is_empty() {
        return Err(CompileError::NoSkills);
    }

    for (index, skill) in skills.iter().enumerate() {
        if !is_command_identifier(&skill.name) {
            return Err(CompileError::InvalidSkillName(skill.name.clone()));
        }
        if skills
            .iter()
            .take(index)
            .any(|earlier| names_match(&earlier.name, &skill.name))
        {
            return Err(CompileError::DuplicateSkill(skill.name.clone()));
        }
    }

    Ok(())
}

/// Whether a skill name can serve as a capture-group tag prefix and schema
/// discriminant: ASCII letters, digits, underscores, not starting with a
/// digit.
fn is_command_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
