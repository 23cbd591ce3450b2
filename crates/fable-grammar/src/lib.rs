//! Action grammar compiler and decoder for the Fable NPC engine.
//!
//! Given a protagonist's skill list and a snapshot of the entities in scope,
//! this crate compiles a constraint artifact that restricts LLM output to
//! exactly the legal action space, and decodes constrained output back into
//! a typed [`Action`](fable_types::Action) with every named reference
//! resolved to its catalog entry.
//!
//! Two interchangeable constraint encodings are supported:
//!
//! - **Pattern encoding** ([`compile_pattern`] / [`ActionPattern`]): one
//!   case-insensitive regex, each skill a tagged alternative, usable with
//!   backends that support guided-regex generation.
//! - **Schema encoding** ([`compile_schema`] / [`ActionSchema`]): a tagged
//!   union of typed records with enumerated legal values, usable with
//!   backends that support guided-JSON generation.
//!
//! Both compilers and their paired decode paths are pure functions of
//! `(skills, catalog)`: no shared state, no caches, safe to call
//! concurrently. Artifacts are snapshot-specific and must never be reused
//! across catalog versions.
//!
//! # Modules
//!
//! - [`error`] -- the compile/decode error taxonomy
//! - [`pattern`] -- the regex constraint artifact
//! - [`schema`] -- the tagged-union schema artifact
//! - [`decode`] -- decoding constrained output into actions

pub mod decode;
pub mod error;
pub mod pattern;
pub mod schema;

pub use error::{CompileError, DecodeError};
pub use pattern::{ActionPattern, compile_pattern};
pub use schema::{ActionSchema, SkillVariant, SlotField, compile_schema};
