//! Target odor extraction.

use regex::Regex;

use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

/// Odors recognized as search targets, in reporting order.
pub const TARGET_ODORS: [&str; 4] = ["Birch", "Anise", "Clove", "Cypress"];

/// Target odors mentioned by a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOdors(pub Vec<String>);

impl IntoMeasurements for TargetOdors {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_list("target_odors", self.0);
    }
}

/// Target odor extractor.
pub struct OdorExtractor {
    odors: Vec<(&'static str, Regex)>,
}

impl OdorExtractor {
    pub fn new() -> Result<Self> {
        let odors = TARGET_ODORS
            .iter()
            .map(|name| Ok((*name, Regex::new(&format!(r"(?i)\b{name}\b"))?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { odors })
    }
}

impl FieldExtractor for OdorExtractor {
    const NAME: &'static str = "target_odors";
    type Output = TargetOdors;

    fn extract(&self, block: &BlockText<'_>) -> Option<TargetOdors> {
        let found: Vec<String> = self
            .odors
            .iter()
            .filter(|(_, pattern)| pattern.is_match(block.text))
            .map(|(name, _)| (*name).to_string())
            .collect();

        (!found.is_empty()).then_some(TargetOdors(found))
    }
}
