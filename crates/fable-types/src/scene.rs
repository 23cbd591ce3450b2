//! World entities visible to a protagonist: locations, items, characters.
//!
//! All entities share the same `{name, description}` shape and are immutable
//! once constructed. Identity for lookup purposes is the name, compared
//! case-insensitively; names are unique within each kind inside one catalog
//! snapshot (a caller precondition, not enforced here).

use serde::{Deserialize, Serialize};

use crate::skill::Skill;

/// A location in the game world, i.e. a town, a forest, etc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    /// Display name, unique among locations in one catalog snapshot.
    pub name: String,
    /// Short human-readable description.
    pub description: String,
}

/// An item in the game world, i.e. a sword, a potion, etc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    /// Display name, unique among items in one catalog snapshot.
    pub name: String,
    /// Short human-readable description.
    pub description: String,
}

/// A character in the game world, i.e. an adventurer or an NPC.
///
/// The `current_location` is carried as an owned snapshot copy because
/// characters cross the HTTP boundary fully inlined; the catalog snapshot,
/// not this link, is the source of truth at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Display name, unique among characters in one catalog snapshot.
    pub name: String,
    /// Short human-readable description.
    pub description: String,
    /// The location the character currently occupies.
    pub current_location: Location,
}

/// The acting character: a [`Character`] augmented with the state that
/// drives its decisions.
///
/// The skill list is the authority for what the grammar compiler may encode
/// for this protagonist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Protagonist {
    /// Display name.
    pub name: String,
    /// Short human-readable description.
    pub description: String,
    /// The location the protagonist currently occupies.
    pub current_location: Location,
    /// Memories the protagonist carries into the prompt.
    pub memories: Vec<String>,
    /// Quests the protagonist is currently on.
    pub quests: Vec<String>,
    /// The skills the protagonist may use this turn.
    pub skills: Vec<Skill>,
    /// Free-form psychological profile for the prompt.
    pub psychological_profile: String,
}

impl Protagonist {
    /// The protagonist viewed as a plain [`Character`].
    ///
    /// Used when stamping the protagonist's identity onto a decoded
    /// [`Action`](crate::action::Action).
    pub fn character(&self) -> Character {
        Character {
            name: self.name.clone(),
            description: self.description.clone(),
            current_location: self.current_location.clone(),
        }
    }
}
