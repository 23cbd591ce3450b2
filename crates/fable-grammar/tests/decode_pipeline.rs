//! Integration tests for the compile-then-decode pipeline.
//!
//! Each test compiles a constraint artifact from a skill list and catalog
//! snapshot, feeds it text or JSON a guided backend could legally produce,
//! and checks the decoded action. Both encodings are exercised against the
//! same fixtures so their decoders stay behaviourally aligned.

#![allow(clippy::unwrap_used)]

use fable_grammar::{DecodeError, compile_pattern, compile_schema};
use fable_types::{
    Character, EntityCatalog, EntityKind, Item, Location, ParameterKind, Protagonist, Skill, Value,
};
use serde_json::json;

fn old_town() -> Location {
    Location {
        name: String::from("Old Town"),
        description: String::from("A quiet and peaceful town."),
    }
}

fn john() -> Character {
    Character {
        name: String::from("John the Brave"),
        description: String::from("A fearless warrior"),
        current_location: old_town(),
    }
}

fn catalog() -> EntityCatalog {
    EntityCatalog::new(
        vec![
            john(),
            Character {
                name: String::from("John"),
                description: String::from("A quiet farmer"),
                current_location: old_town(),
            },
        ],
        vec![
            old_town(),
            Location {
                name: String::from("Harbor"),
                description: String::from("Smells of salt and tar."),
            },
        ],
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

fn aldren(skills: Vec<Skill>) -> Protagonist {
    Protagonist {
        name: String::from("Aldren"),
        description: String::from("Brave and curious"),
        current_location: old_town(),
        memories: vec![String::from("Saved the village")],
        quests: vec![String::from("Find the ancient artifact")],
        skills,
        psychological_profile: String::from("Determined and compassionate"),
    }
}

// ---------------------------------------------------------------------------
// Pattern path
// ---------------------------------------------------------------------------

#[test]
fn pattern_round_trips_a_character_action() {
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern
        .decode("attack John the Brave", &protagonist, &catalog)
        .unwrap();

    assert_eq!(action.command, "attack");
    assert_eq!(action.protagonist.name, "Aldren");
    assert_eq!(action.parameters, vec![Value::Character(john())]);
}

#[test]
fn pattern_decode_is_case_insensitive_and_resolves_catalog_casing() {
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern
        .decode("ATTACK john the brave", &protagonist, &catalog)
        .unwrap();

    // The decoded value carries the catalog's casing, not the model's.
    assert_eq!(action.parameters, vec![Value::Character(john())]);
}

#[test]
fn prefix_named_skill_does_not_shadow_the_longer_one() {
    let protagonist = aldren(vec![
        skill("attack", vec![ParameterKind::Character]),
        skill("attack_heavy", vec![ParameterKind::Character]),
    ]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let heavy = pattern
        .decode("attack_heavy John the Brave", &protagonist, &catalog)
        .unwrap();
    assert_eq!(heavy.command, "attack_heavy");

    let plain = pattern
        .decode("attack John the Brave", &protagonist, &catalog)
        .unwrap();
    assert_eq!(plain.command, "attack");
}

#[test]
fn prefix_named_entity_does_not_shadow_the_longer_one() {
    // The catalog holds both "John" and "John the Brave".
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern
        .decode("attack John the Brave", &protagonist, &catalog)
        .unwrap();
    assert_eq!(action.parameters, vec![Value::Character(john())]);

    let short = pattern.decode("attack John", &protagonist, &catalog).unwrap();
    assert_eq!(
        short.parameters.first().map(|v| match v {
            Value::Character(c) => c.name.clone(),
            _ => String::new(),
        }),
        Some(String::from("John"))
    );
}

#[test]
fn entity_names_with_quotes_and_apostrophes_round_trip() {
    let lucky = Character {
        name: String::from("O'Brien \"Lucky\""),
        description: String::from("A gambler"),
        current_location: old_town(),
    };
    let catalog = EntityCatalog::new(vec![lucky.clone()], vec![old_town()], Vec::new());
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern
        .decode("attack O'Brien \"Lucky\"", &protagonist, &catalog)
        .unwrap();
    assert_eq!(action.parameters, vec![Value::Character(lucky)]);
}

#[test]
fn repeated_slot_kinds_decode_in_declaration_order() {
    let protagonist = aldren(vec![skill(
        "trade",
        vec![
            ParameterKind::Character,
            ParameterKind::Character,
            ParameterKind::Item,
        ],
    )]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern
        .decode("trade John the Brave John Sword", &protagonist, &catalog)
        .unwrap();

    let names: Vec<String> = action
        .parameters
        .iter()
        .map(|v| match v {
            Value::Character(c) => c.name.clone(),
            Value::Item(i) => i.name.clone(),
            _ => String::new(),
        })
        .collect();
    assert_eq!(names, vec!["John the Brave", "John", "Sword"]);
}

#[test]
fn amount_zero_decodes_as_a_present_parameter() {
    let protagonist = aldren(vec![skill("give_coins", vec![ParameterKind::Amount])]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern.decode("give_coins 0", &protagonist, &catalog).unwrap();
    assert_eq!(action.parameters, vec![Value::Amount(0)]);
}

#[test]
fn empty_quoted_content_decodes_as_empty_text() {
    let protagonist = aldren(vec![skill(
        "say",
        vec![ParameterKind::Character, ParameterKind::Content],
    )]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern
        .decode("say John the Brave \"\"", &protagonist, &catalog)
        .unwrap();
    assert_eq!(
        action.parameters,
        vec![Value::Character(john()), Value::Text(String::new())]
    );
}

#[test]
fn quoted_content_is_unwrapped_once() {
    let protagonist = aldren(vec![skill(
        "say",
        vec![ParameterKind::Character, ParameterKind::Content],
    )]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern
        .decode(
            "say John the Brave \"Good morning, traveler\"",
            &protagonist,
            &catalog,
        )
        .unwrap();
    assert_eq!(
        action.parameters.last(),
        Some(&Value::Text(String::from("Good morning, traveler")))
    );
}

#[test]
fn zero_slot_skill_decodes_by_literal_match() {
    let protagonist = aldren(vec![
        skill("wave", Vec::new()),
        skill("attack", vec![ParameterKind::Character]),
    ]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let action = pattern.decode("wave", &protagonist, &catalog).unwrap();
    assert_eq!(action.command, "wave");
    assert!(action.parameters.is_empty());
}

#[test]
fn out_of_catalog_names_cannot_match_the_pattern() {
    // "Dungeon" is in no alternation and "fly" is no skill, so neither
    // text matches any alternative; both fail before reference resolution.
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let unknown_entity = pattern
        .decode("attack Dungeon", &protagonist, &catalog)
        .unwrap_err();
    assert!(matches!(unknown_entity, DecodeError::Malformed(_)));

    let unknown_command = pattern.decode("fly", &protagonist, &catalog).unwrap_err();
    assert!(matches!(unknown_command, DecodeError::Malformed(_)));
}

#[test]
fn unmatched_text_is_malformed() {
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();

    let err = pattern
        .decode("ponder the meaning of it all", &protagonist, &catalog)
        .unwrap_err();
    assert!(matches!(err, DecodeError::Malformed(_)));
}

#[test]
fn skill_removed_after_compile_is_an_unknown_command() {
    // Compile against a wider skill list, decode against a narrower one.
    let full = aldren(vec![
        skill("attack", vec![ParameterKind::Character]),
        skill("grab", vec![ParameterKind::Item]),
    ]);
    let catalog = catalog();
    let pattern = compile_pattern(&full.skills, &catalog).unwrap();

    let narrowed = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let err = pattern.decode("grab Sword", &narrowed, &catalog).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownCommand(name) if name == "grab"));
}

#[test]
fn entity_removed_after_compile_is_an_unknown_reference() {
    // Compile against the full catalog, decode against one that lost an
    // entry in the meantime.
    let protagonist = aldren(vec![skill("grab", vec![ParameterKind::Item])]);
    let full = catalog();
    let pattern = compile_pattern(&protagonist.skills, &full).unwrap();

    let emptied = EntityCatalog::new(
        full.characters.clone(),
        full.locations.clone(),
        vec![Item {
            name: String::from("Shield"),
            description: String::from("A stout shield"),
        }],
    );
    let err = pattern.decode("grab Sword", &protagonist, &emptied).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnknownReference {
            kind: EntityKind::Item,
            name,
        } if name == "Sword"
    ));
}

// ---------------------------------------------------------------------------
// Schema path
// ---------------------------------------------------------------------------

#[test]
fn schema_round_trips_a_character_action() {
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    let payload = json!({
        "action": {
            "command": "attack",
            "parameters": { "character": "john the brave" }
        }
    })
    .to_string();

    let action = schema.decode(&payload, &protagonist, &catalog).unwrap();
    assert_eq!(action.command, "attack");
    assert_eq!(action.parameters, vec![Value::Character(john())]);
}

#[test]
fn schema_reads_repeated_slots_by_indexed_field_names() {
    let protagonist = aldren(vec![skill(
        "trade",
        vec![ParameterKind::Character, ParameterKind::Character],
    )]);
    let catalog = catalog();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    // Deliberately listed out of slot order in the payload.
    let payload = json!({
        "action": {
            "command": "trade",
            "parameters": {
                "character_1": "John",
                "character_0": "John the Brave"
            }
        }
    })
    .to_string();

    let action = schema.decode(&payload, &protagonist, &catalog).unwrap();
    let names: Vec<String> = action
        .parameters
        .iter()
        .map(|v| match v {
            Value::Character(c) => c.name.clone(),
            _ => String::new(),
        })
        .collect();
    assert_eq!(names, vec!["John the Brave", "John"]);
}

#[test]
fn schema_amount_zero_and_content_pass_through() {
    let protagonist = aldren(vec![skill(
        "pay",
        vec![ParameterKind::Amount, ParameterKind::Content],
    )]);
    let catalog = catalog();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    let payload = json!({
        "action": {
            "command": "pay",
            "parameters": { "amount": 0, "content": "for the \"lucky\" dice" }
        }
    })
    .to_string();

    let action = schema.decode(&payload, &protagonist, &catalog).unwrap();
    assert_eq!(
        action.parameters,
        vec![
            Value::Amount(0),
            Value::Text(String::from("for the \"lucky\" dice"))
        ]
    );
}

#[test]
fn schema_zero_slot_skill_needs_no_parameters_object() {
    let protagonist = aldren(vec![skill("wave", Vec::new())]);
    let catalog = catalog();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    let payload = json!({ "action": { "command": "wave" } }).to_string();
    let action = schema.decode(&payload, &protagonist, &catalog).unwrap();
    assert_eq!(action.command, "wave");
    assert!(action.parameters.is_empty());
}

#[test]
fn schema_rejects_commands_outside_the_skill_list() {
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    let payload = json!({
        "action": { "command": "fly", "parameters": {} }
    })
    .to_string();

    let err = schema.decode(&payload, &protagonist, &catalog).unwrap_err();
    assert!(matches!(err, DecodeError::UnknownCommand(name) if name == "fly"));
}

#[test]
fn schema_rejects_invented_entity_names() {
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    let payload = json!({
        "action": {
            "command": "attack",
            "parameters": { "character": "Sir Not-Appearing" }
        }
    })
    .to_string();

    let err = schema.decode(&payload, &protagonist, &catalog).unwrap_err();
    assert!(matches!(
        err,
        DecodeError::UnknownReference {
            kind: EntityKind::Character,
            ..
        }
    ));
}

#[test]
fn schema_rejects_shapes_that_are_not_the_wire_format() {
    let protagonist = aldren(vec![skill("attack", vec![ParameterKind::Character])]);
    let catalog = catalog();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    for bad in [
        "not json at all",
        r#"{"command": "attack"}"#,
        r#"{"action": {"parameters": {}}}"#,
        r#"{"action": {"command": "attack"}}"#,
        r#"{"action": {"command": "attack", "parameters": {"character": 7}}}"#,
    ] {
        let err = schema.decode(bad, &protagonist, &catalog).unwrap_err();
        assert!(matches!(err, DecodeError::Malformed(_)), "payload: {bad}");
    }
}

#[test]
fn both_encodings_decode_the_same_scenario_identically() {
    let protagonist = aldren(vec![
        skill("attack", vec![ParameterKind::Character]),
        skill("move", vec![ParameterKind::Location]),
        skill("grab", vec![ParameterKind::Item]),
    ]);
    let catalog = catalog();
    let pattern = compile_pattern(&protagonist.skills, &catalog).unwrap();
    let schema = compile_schema(&protagonist.skills, &catalog).unwrap();

    let from_text = pattern.decode("move Harbor", &protagonist, &catalog).unwrap();
    let payload = json!({
        "action": { "command": "move", "parameters": { "location": "harbor" } }
    })
    .to_string();
    let from_json = schema.decode(&payload, &protagonist, &catalog).unwrap();

    assert_eq!(from_text, from_json);
}
