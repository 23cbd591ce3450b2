//! Skill declarations: a command name plus an ordered list of typed
//! parameter slots.
//!
//! Slot order is significant and fixed -- it determines both the token order
//! in the compiled grammar and the order of decoded parameter values.

use serde::{Deserialize, Serialize};

/// The kind of one parameter slot in a [`Skill`] declaration.
///
/// A closed enumeration so that adding a new kind is a compile-time-checked
/// change: every compiler and decoder path matches exhaustively.
///
/// The wire format accepts both the bare spelling (`"character"`) and the
/// bracketed spelling (`"<character>"`) emitted by older game clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterKind {
    /// A reference to a character in the catalog.
    #[serde(alias = "<character>")]
    Character,
    /// A reference to a location in the catalog.
    #[serde(alias = "<location>")]
    Location,
    /// A reference to an item in the catalog.
    #[serde(alias = "<item>")]
    Item,
    /// A non-negative integer, e.g. a coin count.
    #[serde(alias = "<amount>")]
    Amount,
    /// Free-form text, double-quoted in the pattern encoding.
    #[serde(alias = "<content>")]
    Content,
}

impl ParameterKind {
    /// The bare lower-case tag used in capture-group and schema field
    /// names (`"character"`, `"amount"`, ...). Tags never contain
    /// underscores; the decoder relies on that when stripping suffixes.
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Character => "character",
            Self::Location => "location",
            Self::Item => "item",
            Self::Amount => "amount",
            Self::Content => "content",
        }
    }

    /// The bracketed form shown to humans and models in skill specs
    /// (`"<character>"`, ...).
    pub const fn bracketed(self) -> &'static str {
        match self {
            Self::Character => "<character>",
            Self::Location => "<location>",
            Self::Item => "<item>",
            Self::Amount => "<amount>",
            Self::Content => "<content>",
        }
    }

    /// Every kind, in declaration order. Useful for suffix recovery in
    /// the decoder.
    pub const ALL: [Self; 5] = [
        Self::Character,
        Self::Location,
        Self::Item,
        Self::Amount,
        Self::Content,
    ];
}

/// A skill that can be performed by a character.
///
/// e.g. `say <character> <content>`, `move <location>`, `give_coins <amount>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    /// Command name. Must be a valid command identifier (ASCII letters,
    /// digits, underscores, not starting with a digit) -- the grammar
    /// compiler rejects anything else.
    pub name: String,
    /// Human-readable description shown in the prompt.
    pub description: String,
    /// Ordered, typed parameter slots.
    #[serde(default)]
    pub parameters: Vec<ParameterKind>,
}

impl Skill {
    /// Render the single-line declaration shown to the model when
    /// enumerating allowed actions.
    ///
    /// Format: `<name> <slot1> <slot2> ... : <description>`, e.g.
    /// `attack <character> : Deliver a powerful blow`. Slot order matches
    /// [`Skill::parameters`] exactly.
    pub fn render_spec(&self) -> String {
        let mut tokens = Vec::with_capacity(self.parameters.len().saturating_add(3));
        tokens.push(self.name.as_str());
        for kind in &self.parameters {
            tokens.push(kind.bracketed());
        }
        tokens.push(":");
        tokens.push(self.description.as_str());
        tokens.join(" ")
    }
}
