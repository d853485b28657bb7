//! Authoritative measurement overrides.
//!
//! A verified correction dataset, keyed `element -> level -> {field: value}`,
//! is merged over the parsed measurements as the last pipeline stage.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::error::{Result, RulebookError};
use crate::models::rule::{Element, Level, MeasurementsSource, Rule};

/// Verified measurement values per (element, level) class.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthoritativeMeasurements {
    entries: BTreeMap<(Element, Level), Map<String, Value>>,
    ignored: Vec<String>,
}

impl AuthoritativeMeasurements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a dataset of the form `{ "Container": { "Master": { "min_hides": 1 } } }`.
    ///
    /// Element and level names are matched case-insensitively. Unrecognized
    /// names and non-object entries are skipped and listed in [`Self::ignored`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Map<String, Value> = serde_json::from_str(json)?;
        let mut dataset = Self::new();

        for (element_key, levels) in &root {
            let Some(element) = Element::from_name(element_key) else {
                warn!(key = %element_key, "unknown element in override dataset");
                dataset.ignored.push(element_key.clone());
                continue;
            };
            let Some(levels) = levels.as_object() else {
                warn!(key = %element_key, "override entry is not an object");
                dataset.ignored.push(element_key.clone());
                continue;
            };

            for (level_key, fields) in levels {
                let path = format!("{element_key}.{level_key}");
                match (Level::from_name(level_key), fields.as_object()) {
                    (Some(level), Some(fields)) => dataset.insert(element, level, fields.clone()),
                    (None, _) => {
                        warn!(key = %path, "unknown level in override dataset");
                        dataset.ignored.push(path);
                    }
                    (Some(_), None) => {
                        warn!(key = %path, "override entry is not an object");
                        dataset.ignored.push(path);
                    }
                }
            }
        }

        Ok(dataset)
    }

    /// Load a dataset from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(RulebookError::InputNotFound {
                path: path.to_path_buf(),
            });
        }
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Load a dataset if one is available. A missing or unreadable file is not
    /// fatal: parsing continues with parsed measurements only.
    pub fn load_optional(path: &Path) -> Option<Self> {
        match Self::from_file(path) {
            Ok(dataset) => {
                info!(path = %path.display(), classes = dataset.len(), "loaded authoritative measurements");
                Some(dataset)
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "authoritative measurements unavailable; keeping parsed values");
                None
            }
        }
    }

    pub fn insert(&mut self, element: Element, level: Level, fields: Map<String, Value>) {
        self.entries.insert((element, level), fields);
    }

    pub fn get(&self, element: Element, level: Level) -> Option<&Map<String, Value>> {
        self.entries.get(&(element, level))
    }

    /// Number of classes with an entry.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys skipped while parsing, as `element` or `element.level`.
    pub fn ignored(&self) -> &[String] {
        &self.ignored
    }
}

/// Merge authoritative fields over matching rules.
///
/// A rule matches when both its element and level are set and the dataset
/// has an entry for that pair. Override values win key by key; other keys
/// are kept. Returns the number of rules whose source became authoritative.
pub fn apply_overrides(rules: &mut [Rule], dataset: Option<&AuthoritativeMeasurements>) -> usize {
    let Some(dataset) = dataset else {
        return 0;
    };

    let mut overridden = 0;
    for rule in rules.iter_mut() {
        let Some((element, level)) = rule.class_key() else {
            continue;
        };
        let Some(fields) = dataset.get(element, level) else {
            continue;
        };

        if rule.measurements.overlay(fields) > 0 {
            rule.measurements_source = MeasurementsSource::Authoritative;
            overridden += 1;
            debug!(section = %rule.section, fields = fields.len(), "applied authoritative measurements");
        }
    }

    overridden
}
