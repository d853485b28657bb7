//! Rule records produced by the rulebook parser.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Competition skill tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Novice,
    Advanced,
    Excellent,
    Master,
}

impl Level {
    /// All levels in declaration order.
    pub const ALL: [Level; 4] = [Level::Novice, Level::Advanced, Level::Excellent, Level::Master];

    /// Display name as printed in the rulebook.
    pub fn name(&self) -> &'static str {
        match self {
            Level::Novice => "Novice",
            Level::Advanced => "Advanced",
            Level::Excellent => "Excellent",
            Level::Master => "Master",
        }
    }

    /// Column of this level in a four-column hide table.
    pub fn table_index(&self) -> usize {
        match self {
            Level::Novice => 0,
            Level::Advanced => 1,
            Level::Excellent => 2,
            Level::Master => 3,
        }
    }

    /// Parse a level name, ignoring case and surrounding whitespace.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|l| l.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Search discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Element {
    Container,
    Interior,
    Exterior,
    Buried,
}

impl Element {
    /// All elements in declaration order.
    pub const ALL: [Element; 4] = [
        Element::Container,
        Element::Interior,
        Element::Exterior,
        Element::Buried,
    ];

    /// Display name as printed in the rulebook.
    pub fn name(&self) -> &'static str {
        match self {
            Element::Container => "Container",
            Element::Interior => "Interior",
            Element::Exterior => "Exterior",
            Element::Buried => "Buried",
        }
    }

    /// Parse an element name, ignoring case and surrounding whitespace.
    pub fn from_name(s: &str) -> Option<Self> {
        let s = s.trim();
        Self::ALL.into_iter().find(|e| e.name().eq_ignore_ascii_case(s))
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single category label attached to every rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Search Area")]
    SearchArea,
    #[serde(rename = "Time Limit")]
    TimeLimit,
    #[serde(rename = "Hides")]
    Hides,
    #[serde(rename = "Equipment")]
    Equipment,
    #[serde(rename = "Handler Requirements")]
    HandlerRequirements,
    #[serde(rename = "Judging")]
    Judging,
    #[serde(rename = "Faults and Eliminations")]
    FaultsAndEliminations,
    #[serde(rename = "General")]
    General,
}

impl Category {
    /// Human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            Category::SearchArea => "Search Area",
            Category::TimeLimit => "Time Limit",
            Category::Hides => "Hides",
            Category::Equipment => "Equipment",
            Category::HandlerRequirements => "Handler Requirements",
            Category::Judging => "Judging",
            Category::FaultsAndEliminations => "Faults and Eliminations",
            Category::General => "General",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where the values in [`Rule::measurements`] came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementsSource {
    /// Extracted from the rulebook text.
    #[default]
    Parsed,
    /// At least one field was replaced from the verified correction dataset.
    Authoritative,
}

/// Open key/value mapping of extracted quantities.
///
/// Backed by an ordered map so serialized output is stable across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measurements(BTreeMap<String, Value>);

impl Measurements {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Insert a raw JSON value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    pub fn set_u32(&mut self, key: &str, value: u32) {
        self.insert(key, value);
    }

    pub fn set_bool(&mut self, key: &str, value: bool) {
        self.insert(key, value);
    }

    pub fn set_str(&mut self, key: &str, value: impl Into<String>) {
        self.insert(key, value.into());
    }

    pub fn set_list(&mut self, key: &str, values: Vec<String>) {
        self.insert(key, values);
    }

    pub fn get_u64(&self, key: &str) -> Option<u64> {
        self.0.get(key).and_then(Value::as_u64)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Swap an inverted numeric pair so that `min_key <= max_key`.
    pub fn order_range(&mut self, min_key: &str, max_key: &str) {
        if let (Some(min), Some(max)) = (self.get_u64(min_key), self.get_u64(max_key)) {
            if min > max {
                self.insert(min_key, max);
                self.insert(max_key, min);
            }
        }
    }

    /// Shallow-merge `fields` over this map. Returns the number of keys written.
    pub fn overlay(&mut self, fields: &Map<String, Value>) -> usize {
        for (key, value) in fields {
            self.0.insert(key.clone(), value.clone());
        }
        fields.len()
    }
}

/// A single rule record derived from one block of rulebook text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Chapter/section identifier, e.g. "Chapter 4, Section 2".
    pub section: String,

    /// Short label for the block.
    pub title: String,

    /// Raw text span the rule was derived from.
    pub content: String,

    /// Competition level the block governs.
    pub level: Option<Level>,

    /// Search element the block governs.
    pub element: Option<Element>,

    pub category: Category,

    /// Lower-case search keywords.
    pub keywords: BTreeSet<String>,

    pub measurements: Measurements,

    #[serde(default)]
    pub measurements_source: MeasurementsSource,
}

impl Rule {
    /// True when both element and level are known.
    pub fn class_key(&self) -> Option<(Element, Level)> {
        Some((self.element?, self.level?))
    }
}
