//! Log Card - Output structures for the brain.
//!
//! A `ResponseResult` is what one utterance produces: reply text plus, for the four
//! tracked domains, a `LogCard` that a UI renders as label/value rows.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// The tracked domain a card belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardType {
    Food,
    Activity,
    Symptom,
    Energy,
}

impl CardType {
    /// Display title with icon
    pub fn title(&self) -> &'static str {
        match self {
            CardType::Food => "🥦 Food Log",
            CardType::Activity => "🏃 Activity Log",
            CardType::Symptom => "⚠️ Symptom Log",
            CardType::Energy => "⚡ Energy Log",
        }
    }

    /// Returns the type label used on the wire
    pub fn label(&self) -> &'static str {
        match self {
            CardType::Food => "food",
            CardType::Activity => "activity",
            CardType::Symptom => "symptom",
            CardType::Energy => "energy",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ordered label -> display value rows.
///
/// Serialized as a JSON object whose keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardData(Vec<(String, String)>);

impl CardData {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a row, replacing the value if the label already exists.
    pub fn insert(&mut self, label: impl Into<String>, value: impl Into<String>) {
        let label = label.into();
        let value = value.into();
        match self.0.iter_mut().find(|(l, _)| *l == label) {
            Some(row) => row.1 = value,
            None => self.0.push((label, value)),
        }
    }

    /// Builder-style `insert`
    pub fn with(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(label, value);
        self
    }

    pub fn get(&self, label: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(l, v)| (l.as_str(), v.as_str()))
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|(_, v)| v.as_str())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for CardData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Accepts strings, numbers and booleans as values, keeping key order.
struct CardDataVisitor;

impl<'de> Visitor<'de> for CardDataVisitor {
    type Value = CardData;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a map of labels to scalar display values")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<CardData, A::Error> {
        let mut data = CardData::new();
        while let Some((label, value)) = access.next_entry::<String, serde_json::Value>()? {
            let display = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                other => {
                    return Err(de::Error::custom(format!(
                        "label '{}' has non-scalar value {}",
                        label, other
                    )))
                }
            };
            data.insert(label, display);
        }
        Ok(data)
    }
}

impl<'de> Deserialize<'de> for CardData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(CardDataVisitor)
    }
}

/// Structured record summarizing one tracked health event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogCard {
    #[serde(rename = "type")]
    pub card_type: CardType,
    pub title: String,
    pub data: CardData,
}

impl LogCard {
    /// Create a card with the standard title for its type
    pub fn new(card_type: CardType, data: CardData) -> Self {
        Self {
            card_type,
            title: card_type.title().to_string(),
            data,
        }
    }
}

/// Reply text plus optional card - the sole output of one turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseResult {
    pub text: String,
    pub card: Option<LogCard>,
}

impl ResponseResult {
    /// A reply with no card
    pub fn text_only(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            card: None,
        }
    }

    pub fn with_card(text: impl Into<String>, card: LogCard) -> Self {
        Self {
            text: text.into(),
            card: Some(card),
        }
    }
}
