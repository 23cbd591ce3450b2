//! Wire types for the step API.
//!
//! The request shape mirrors the game client protocol: a full scene
//! snapshot per step, nothing held server-side between calls.

use fable_types::{Action, Character, EntityCatalog, Item, Location, Protagonist};
use serde::{Deserialize, Serialize};

/// The body of a `POST /api/step` request: one protagonist's view of the
/// scene at the moment of decision.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRequest {
    /// Free-form world knowledge injected into the prompt.
    pub context: String,
    /// Locations known to the protagonist.
    pub locations: Vec<Location>,
    /// Characters visible to the protagonist. The legacy client field
    /// name is `NPCs`.
    #[serde(rename = "NPCs", alias = "npcs")]
    pub npcs: Vec<Character>,
    /// The acting character.
    pub protagonist: Protagonist,
    /// Items in scope.
    #[serde(default)]
    pub items: Vec<Item>,
    /// Recent actions shown to the model as scene history.
    #[serde(default)]
    pub events: Vec<Action>,
}

impl StepRequest {
    /// The entity snapshot this request's artifact is compiled against and
    /// its response is decoded against.
    pub fn catalog(&self) -> EntityCatalog {
        EntityCatalog::new(
            self.npcs.clone(),
            self.locations.clone(),
            self.items.clone(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_the_legacy_field_casing() {
        let raw = r#"{
            "context": "A medieval fantasy world.",
            "locations": [{"name": "Old Town", "description": "A quiet town."}],
            "NPCs": [],
            "protagonist": {
                "name": "Aldren",
                "description": "Brave and curious",
                "current_location": {"name": "Old Town", "description": "A quiet town."},
                "memories": [],
                "quests": [],
                "skills": [],
                "psychological_profile": "Determined"
            }
        }"#;
        let request: Result<StepRequest, _> = serde_json::from_str(raw);
        assert_eq!(request.ok().map(|r| r.protagonist.name), Some(String::from("Aldren")));
    }

    #[test]
    fn catalog_snapshot_covers_all_three_kinds() {
        let old_town = Location {
            name: String::from("Old Town"),
            description: String::from("A quiet town."),
        };
        let request = StepRequest {
            context: String::from("ctx"),
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
                skills: Vec::new(),
                psychological_profile: String::from("Determined"),
            },
            items: vec![Item {
                name: String::from("Sword"),
                description: String::from("A sharp blade"),
            }],
            events: Vec::new(),
        };

        let catalog = request.catalog();
        assert!(catalog.character("John the Brave").is_some());
        assert!(catalog.location("Old Town").is_some());
        assert!(catalog.item("Sword").is_some());
    }
}
