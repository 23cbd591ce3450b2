//! Error taxonomy for grammar compilation and action decoding.
//!
//! Uses `thiserror` for typed errors. Compile errors indicate a caller
//! data-integrity bug and are fatal to the compile call; decode errors are
//! recoverable by the caller (typically logged and the turn retried with a
//! fresh generation). Neither path ever yields a partially populated action.

use fable_types::EntityKind;

/// Errors raised when skill or catalog data is structurally unfit for
/// compilation.
///
/// These should not occur in normal operation -- they mean the caller
/// handed the compiler broken data, not that the model misbehaved.
#[derive(Debug, thiserror::Error)]
pub enum CompileError {
    /// The protagonist has no skills, so there is no legal action space
    /// to encode.
    #[error("cannot compile an empty skill list")]
    NoSkills,

    /// A skill name is not a valid command identifier (ASCII letters,
    /// digits, underscores, not starting with a digit). Capture-group tags
    /// and schema discriminants are built from skill names, so anything
    /// else cannot be encoded.
    #[error("skill `{0}` is not a valid command identifier")]
    InvalidSkillName(String),

    /// Two skills in one list share a name (case-insensitively). The
    /// artifact could not distinguish which one fired.
    #[error("duplicate skill name `{0}`")]
    DuplicateSkill(String),

    /// A skill declares a reference-typed slot but the catalog holds no
    /// entities of that kind, so the slot could never match a legal value.
    #[error("skill `{skill}` declares a {kind} slot but the catalog has no {kind} entries")]
    EmptyRoster {
        /// The skill declaring the unfillable slot.
        skill: String,
        /// The entity kind with an empty roster.
        kind: EntityKind,
    },

    /// The assembled pattern was rejected by the regex engine.
    #[error("pattern compilation failed: {0}")]
    Pattern(String),
}

/// Errors raised when model output cannot be decoded into an action.
///
/// All variants are local, typed failures returned to the caller; the
/// decoder performs no retries and no fallback guessing.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The output does not match the expected pattern or schema shape at
    /// all, or a numeric field failed to parse.
    #[error("malformed action: {0}")]
    Malformed(String),

    /// A skill name was syntactically recovered but is not in the
    /// protagonist's current skill list (stale artifact or model drift).
    #[error("unknown command `{0}`")]
    UnknownCommand(String),

    /// A captured entity name has no match in the supplied catalog (the
    /// model invented a name, or the catalog changed between compile and
    /// decode).
    #[error("unknown {kind} reference `{name}`")]
    UnknownReference {
        /// The slot kind that failed to resolve.
        kind: EntityKind,
        /// The name that has no catalog entry.
        name: String,
    },
}
