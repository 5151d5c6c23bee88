//! Card data model.
//!
//! A [`Card`] has one or more [`CardFace`]s, each with one or more
//! [`CardPart`]s. Record-level attributes (set, rarity, foil...) live on the
//! card; content attributes (name, text, type, artist...) live on parts.
//!
//! The serialized shape uses PascalCase property names, and every property
//! is optional on input.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::fields::{ElementAttr, RecordAttr};
use crate::traits::Searchable;
use crate::value::Value;

/// One catalog entry: a specific printing of a card in a language.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Card {
    pub id: String,
    pub game: String,
    /// `card`, `token`, `emblem`, `art`, `don`, ...
    pub kind: String,
    pub reference_id: String,
    pub language: String,
    pub set_name: String,
    pub rarity: String,
    pub is_foil: bool,
    pub foil_type: Option<String>,
    pub number: Option<String>,
    pub faces: Vec<CardFace>,
}

/// A physical face or printing of a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CardFace {
    pub parts: Vec<CardPart>,
    pub layout: String,
}

/// The finest searchable unit: one named part of a face.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct CardPart {
    pub name: String,
    pub printed_name: String,
    pub text: String,
    pub printed_text: String,
    #[serde(rename = "Type")]
    pub card_type: String,
    pub printed_type: String,
    pub sub_types: String,
    pub printed_sub_types: String,
    pub card_colors: Vec<String>,
    pub cost: Option<i32>,
    pub artist: String,
    pub image_src: String,
    /// Game-specific attributes (`Power`, `Counter`, `AttackTypes`, ...),
    /// kept as-is and not searchable.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Card {
    /// Name shown for the card: the part names of its first face joined
    /// with `" // "`, or the id when the first face has no parts.
    pub fn display_name(&self) -> String {
        let parts = self.faces.first().map_or(&[][..], |f| f.parts.as_slice());
        match parts {
            [] => self.id.clone(),
            [part] => part.name.clone(),
            _ => parts
                .iter()
                .map(|p| p.name.as_str())
                .collect::<Vec<_>>()
                .join(" // "),
        }
    }

    /// Iterates over every part of every face, in order.
    pub fn parts(&self) -> impl Iterator<Item = &CardPart> + '_ {
        self.faces.iter().flat_map(|face| face.parts.iter())
    }
}

impl CardPart {
    /// Returns the value of a part attribute.
    pub fn value(&self, attr: ElementAttr) -> Value<'_> {
        let s = match attr {
            ElementAttr::Name => &self.name,
            ElementAttr::PrintedName => &self.printed_name,
            ElementAttr::Text => &self.text,
            ElementAttr::PrintedText => &self.printed_text,
            ElementAttr::Type => &self.card_type,
            ElementAttr::PrintedType => &self.printed_type,
            ElementAttr::SubTypes => &self.sub_types,
            ElementAttr::PrintedSubTypes => &self.printed_sub_types,
            ElementAttr::Artist => &self.artist,
        };
        Value::String(s)
    }
}

impl Searchable for Card {
    fn record_value(&self, attr: RecordAttr) -> Value<'_> {
        match attr {
            RecordAttr::Id => Value::String(&self.id),
            RecordAttr::Game => Value::String(&self.game),
            RecordAttr::Kind => Value::String(&self.kind),
            RecordAttr::ReferenceId => Value::String(&self.reference_id),
            RecordAttr::Language => Value::String(&self.language),
            RecordAttr::SetName => Value::String(&self.set_name),
            RecordAttr::Rarity => Value::String(&self.rarity),
            RecordAttr::IsFoil => Value::Bool(self.is_foil),
            RecordAttr::FoilType => self.foil_type.as_deref().into(),
            RecordAttr::Number => self.number.as_deref().into(),
        }
    }

    fn any_element(&self, attr: ElementAttr, test: &dyn Fn(&Value<'_>) -> bool) -> bool {
        self.parts().any(|part| test(&part.value(attr)))
    }
}
