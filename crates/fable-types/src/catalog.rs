//! The entity catalog: the set of characters, locations, and items visible
//! to a protagonist at one moment in time.
//!
//! A catalog is an immutable snapshot. Constraint artifacts compiled from a
//! catalog and actions decoded against it must use the *same* snapshot --
//! capture-group contents and schema enumerations are catalog-specific.

use serde::{Deserialize, Serialize};

use crate::scene::{Character, Item, Location};

/// The three disjoint kinds of world entity a skill slot can reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    /// A character (NPC or adventurer).
    Character,
    /// A location.
    Location,
    /// An item.
    Item,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Character => "character",
            Self::Location => "location",
            Self::Item => "item",
        };
        write!(f, "{label}")
    }
}

/// An immutable snapshot of the entities in scope for one compile/decode
/// pair.
///
/// Lookup is a case-insensitive exact-name match within one kind. Names are
/// unique within each kind (caller precondition); cross-kind collisions are
/// permitted and resolved by the slot kind, not the name alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityCatalog {
    /// Characters visible to the protagonist.
    pub characters: Vec<Character>,
    /// Locations known to the protagonist.
    pub locations: Vec<Location>,
    /// Items in scope.
    pub items: Vec<Item>,
}

impl EntityCatalog {
    /// Build a catalog snapshot from the entity lists in scope.
    pub const fn new(
        characters: Vec<Character>,
        locations: Vec<Location>,
        items: Vec<Item>,
    ) -> Self {
        Self {
            characters,
            locations,
            items,
        }
    }

    /// Find a character by case-insensitive exact name.
    pub fn character(&self, name: &str) -> Option<&Character> {
        self.characters.iter().find(|c| names_match(&c.name, name))
    }

    /// Find a location by case-insensitive exact name.
    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|l| names_match(&l.name, name))
    }

    /// Find an item by case-insensitive exact name.
    pub fn item(&self, name: &str) -> Option<&Item> {
        self.items.iter().find(|i| names_match(&i.name, name))
    }

    /// The names of every entity of the given kind, in catalog order.
    pub fn names(&self, kind: EntityKind) -> Vec<&str> {
        match kind {
            EntityKind::Character => self.characters.iter().map(|c| c.name.as_str()).collect(),
            EntityKind::Location => self.locations.iter().map(|l| l.name.as_str()).collect(),
            EntityKind::Item => self.items.iter().map(|i| i.name.as_str()).collect(),
        }
    }
}

/// Case-insensitive name equality.
///
/// Uses full Unicode lowercasing rather than ASCII folding because entity
/// names come straight from game content and may contain arbitrary
/// characters.
pub fn names_match(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
