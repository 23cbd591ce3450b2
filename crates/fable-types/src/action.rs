//! Decoded actions: the typed result of one generation turn.
//!
//! An [`Action`] is produced once per decode call and is immutable. Its
//! parameters are fully resolved -- entity references point at catalog
//! entries, not names -- and are ordered exactly as the skill declared its
//! slots.

use serde::{Deserialize, Serialize};

use crate::scene::{Character, Item, Location};

/// One resolved parameter value of a decoded [`Action`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    /// A resolved character reference.
    Character(Character),
    /// A resolved location reference.
    Location(Location),
    /// A resolved item reference.
    Item(Item),
    /// A non-negative integer amount.
    Amount(u32),
    /// Free-form text content, with the structural quotes stripped.
    Text(String),
}

impl std::fmt::Display for Value {
    /// Entities print as their name, amounts as digits, text verbatim.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Character(c) => write!(f, "{}", c.name),
            Self::Location(l) => write!(f, "{}", l.name),
            Self::Item(i) => write!(f, "{}", i.name),
            Self::Amount(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// The decoded result of one generation turn: which command fired, who
/// performed it, and the resolved parameter values in slot-declaration
/// order.
///
/// `command` equals the name of exactly one skill in the protagonist's list
/// at decode time. An action decoded against a stale catalog is not
/// re-validated; decode and catalog must come from the same snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The skill name that fired.
    pub command: String,
    /// The acting character.
    pub protagonist: Character,
    /// Resolved parameter values, ordered as the skill declared its slots.
    pub parameters: Vec<Value>,
}

impl std::fmt::Display for Action {
    /// Render in the training format: `<protagonist>: <command> <p1> <p2>`.
    ///
    /// e.g. `Aldren: say Bob Hello, how are you`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.protagonist.name, self.command)?;
        for value in &self.parameters {
            write!(f, " {value}")?;
        }
        Ok(())
    }
}
