//! Distraction count and type extraction.

use regex::Regex;

use super::patterns::{parse_count, sentences, COUNT};
use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

/// Distraction kinds, in reporting order.
pub const DISTRACTION_TYPES: [&str; 6] = ["non-food", "food", "auditory", "visual", "human", "mimic"];

const QUALIFIER: &str = r"(?:(?:non-?food|food|auditory|visual|human|mimic)\s+)?";

/// Distractions present in a search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distractions {
    pub count: u32,
    pub types: Vec<String>,
}

impl IntoMeasurements for Distractions {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_u32("num_distractions", self.count);
        if !self.types.is_empty() {
            measurements.set_list("distraction_types", self.types);
        }
    }
}

/// Distraction extractor.
pub struct DistractionExtractor {
    count: Regex,
    none: Regex,
    mention: Regex,
    non_food: Regex,
    kinds: Vec<(&'static str, Regex)>,
}

impl DistractionExtractor {
    pub fn new() -> Result<Self> {
        let kinds = DISTRACTION_TYPES
            .iter()
            .filter(|kind| **kind != "non-food")
            .map(|kind| Ok((*kind, Regex::new(&format!(r"(?i)\b{kind}\b"))?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            count: Regex::new(&format!(r"(?i)\b{COUNT}\s+{QUALIFIER}distractions?\b"))?,
            none: Regex::new(&format!(r"(?i)\bno\s+{QUALIFIER}distractions?\b"))?,
            mention: Regex::new(r"(?i)\bdistractions?\b")?,
            non_food: Regex::new(r"(?i)\bnon-?food\b")?,
            kinds,
        })
    }

    fn types(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();

        for sentence in sentences(text).filter(|s| self.mention.is_match(s)) {
            if self.non_food.is_match(sentence) {
                push_unique(&mut found, "non-food");
            }
            // "non-food" must not also count as "food"
            let remainder = self.non_food.replace_all(sentence, " ");
            for (kind, pattern) in &self.kinds {
                if pattern.is_match(&remainder) {
                    push_unique(&mut found, kind);
                }
            }
        }

        DISTRACTION_TYPES
            .iter()
            .filter(|kind| found.iter().any(|f| f == **kind))
            .map(|kind| (*kind).to_string())
            .collect()
    }
}

fn push_unique(found: &mut Vec<String>, kind: &str) {
    if !found.iter().any(|f| f == kind) {
        found.push(kind.to_string());
    }
}

impl FieldExtractor for DistractionExtractor {
    const NAME: &'static str = "distractions";
    type Output = Distractions;

    fn extract(&self, block: &BlockText<'_>) -> Option<Distractions> {
        let text = block.text;

        let count = match self.count.captures(text) {
            Some(caps) => parse_count(&caps[1])?,
            None if self.none.is_match(text) => 0,
            None => return None,
        };

        let types = if count > 0 { self.types(text) } else { Vec::new() };

        Some(Distractions { count, types })
    }
}
