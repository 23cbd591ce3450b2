//! Shared type definitions for the Fable NPC engine.
//!
//! This crate is the single source of truth for the scene data model used
//! across the Fable workspace: the entities visible to a protagonist, the
//! skills a protagonist can perform, and the typed actions decoded from
//! constrained LLM output.
//!
//! # Modules
//!
//! - [`scene`] -- World entities (locations, items, characters) and the
//!   protagonist
//! - [`skill`] -- Skill declarations and typed parameter slots
//! - [`catalog`] -- The entity catalog snapshot used for compiling and
//!   decoding
//! - [`action`] -- Decoded actions and resolved parameter values

pub mod action;
pub mod catalog;
pub mod scene;
pub mod skill;

// Re-export all public types at crate root for convenience.
pub use action::{Action, Value};
pub use catalog::{EntityCatalog, EntityKind};
pub use scene::{Character, Item, Location, Protagonist};
pub use skill::{ParameterKind, Skill};
