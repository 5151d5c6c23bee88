//! Field resolution: query aliases to card attributes.
//!
//! A [`FieldTable`] maps the aliases users type (`s`, `set`, `name`, ...) to a
//! [`FieldBinding`]. Bindings are decided when the table is built, so the
//! compiler matches on them exhaustively and never looks attributes up by
//! name at evaluation time.
//!
//! Record-level attributes are read directly off the card. Element-level
//! attributes live on card parts and are matched existentially: a card
//! matches if any part of any face matches.

use std::collections::BTreeMap;
use std::fmt;

/// The kind of value an attribute holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Text,
    Bool,
}

impl ValueKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ValueKind::Text => "text",
            ValueKind::Bool => "boolean",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Searchable attributes of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RecordAttr {
    Id,
    Game,
    Kind,
    ReferenceId,
    Language,
    SetName,
    Rarity,
    IsFoil,
    FoilType,
    Number,
}

impl RecordAttr {
    pub fn kind(self) -> ValueKind {
        match self {
            RecordAttr::IsFoil => ValueKind::Bool,
            _ => ValueKind::Text,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            RecordAttr::Id => "Id",
            RecordAttr::Game => "Game",
            RecordAttr::Kind => "Kind",
            RecordAttr::ReferenceId => "ReferenceId",
            RecordAttr::Language => "Language",
            RecordAttr::SetName => "SetName",
            RecordAttr::Rarity => "Rarity",
            RecordAttr::IsFoil => "IsFoil",
            RecordAttr::FoilType => "FoilType",
            RecordAttr::Number => "Number",
        }
    }
}

/// Searchable attributes of a card part.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementAttr {
    Name,
    PrintedName,
    Text,
    PrintedText,
    Type,
    PrintedType,
    SubTypes,
    PrintedSubTypes,
    Artist,
}

impl ElementAttr {
    pub fn kind(self) -> ValueKind {
        ValueKind::Text
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ElementAttr::Name => "Name",
            ElementAttr::PrintedName => "PrintedName",
            ElementAttr::Text => "Text",
            ElementAttr::PrintedText => "PrintedText",
            ElementAttr::Type => "Type",
            ElementAttr::PrintedType => "PrintedType",
            ElementAttr::SubTypes => "SubTypes",
            ElementAttr::PrintedSubTypes => "PrintedSubTypes",
            ElementAttr::Artist => "Artist",
        }
    }
}

/// Where a field alias reads its value from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldBinding {
    /// An attribute of the card itself.
    Direct(RecordAttr),
    /// An attribute of each part, matched if any part of any face matches.
    Nested(ElementAttr),
}

impl FieldBinding {
    /// The kind of value the bound attribute holds.
    pub fn kind(self) -> ValueKind {
        match self {
            FieldBinding::Direct(attr) => attr.kind(),
            FieldBinding::Nested(attr) => attr.kind(),
        }
    }

    /// Returns `true` for part-level bindings.
    pub fn is_nested(self) -> bool {
        matches!(self, FieldBinding::Nested(_))
    }
}

impl fmt::Display for FieldBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldBinding::Direct(attr) => write!(f, "card.{}", attr.as_str()),
            FieldBinding::Nested(attr) => write!(f, "part.{}", attr.as_str()),
        }
    }
}

/// Aliases every table starts from.
pub const STANDARD_FIELDS: &[(&str, FieldBinding)] = &[
    ("g", FieldBinding::Direct(RecordAttr::Game)),
    ("game", FieldBinding::Direct(RecordAttr::Game)),
    ("r", FieldBinding::Direct(RecordAttr::Rarity)),
    ("rarity", FieldBinding::Direct(RecordAttr::Rarity)),
    ("s", FieldBinding::Direct(RecordAttr::SetName)),
    ("set", FieldBinding::Direct(RecordAttr::SetName)),
    ("number", FieldBinding::Direct(RecordAttr::Number)),
    ("language", FieldBinding::Direct(RecordAttr::Language)),
    ("foil", FieldBinding::Direct(RecordAttr::IsFoil)),
    ("n", FieldBinding::Nested(ElementAttr::Name)),
    ("name", FieldBinding::Nested(ElementAttr::Name)),
    ("text", FieldBinding::Nested(ElementAttr::Text)),
    ("t", FieldBinding::Nested(ElementAttr::Type)),
    ("type", FieldBinding::Nested(ElementAttr::Type)),
    ("artist", FieldBinding::Nested(ElementAttr::Artist)),
];

/// Case-insensitive table of field aliases.
///
/// # Example
///
/// ```
/// use cardseek::{ElementAttr, FieldBinding, FieldTable, RecordAttr};
///
/// let fields = FieldTable::standard()
///     .with_alias("subtype", FieldBinding::Nested(ElementAttr::SubTypes));
///
/// assert_eq!(fields.resolve("SET"), Some(FieldBinding::Direct(RecordAttr::SetName)));
/// assert_eq!(fields.resolve("subtype"), Some(FieldBinding::Nested(ElementAttr::SubTypes)));
/// assert_eq!(fields.resolve("zz"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldTable {
    aliases: BTreeMap<String, FieldBinding>,
}

impl FieldTable {
    /// A table with no aliases.
    pub fn empty() -> Self {
        FieldTable {
            aliases: BTreeMap::new(),
        }
    }

    /// The standard card aliases.
    pub fn standard() -> Self {
        STANDARD_FIELDS
            .iter()
            .fold(FieldTable::empty(), |table, (alias, binding)| {
                table.with_alias(alias, *binding)
            })
    }

    /// Registers an alias, replacing any previous binding for it.
    pub fn with_alias(mut self, alias: &str, binding: FieldBinding) -> Self {
        self.aliases.insert(alias.to_lowercase(), binding);
        self
    }

    /// Looks up an alias, ignoring case.
    pub fn resolve(&self, alias: &str) -> Option<FieldBinding> {
        if let Some(binding) = self.aliases.get(alias) {
            return Some(*binding);
        }
        self.aliases.get(&alias.to_lowercase()).copied()
    }

    /// Lists aliases in sorted order.
    pub fn aliases(&self) -> impl Iterator<Item = (&str, FieldBinding)> + '_ {
        self.aliases
            .iter()
            .map(|(alias, binding)| (alias.as_str(), *binding))
    }

    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

impl Default for FieldTable {
    fn default() -> Self {
        FieldTable::standard()
    }
}
