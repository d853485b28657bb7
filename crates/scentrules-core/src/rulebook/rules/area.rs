//! Search area size extraction.

use regex::Regex;

use super::patterns::{parse_count, QUANTITY};
use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

const SQUARE_FEET: &str = r"(?:square\s+(?:feet|foot)|sq\.?\s*ft\.?)";

/// Search area bounds in square feet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AreaRange {
    pub min: Option<u32>,
    pub max: Option<u32>,
}

impl IntoMeasurements for AreaRange {
    fn write_to(self, measurements: &mut Measurements) {
        if let Some(min) = self.min {
            measurements.set_u32("min_area_sq_ft", min);
        }
        if let Some(max) = self.max {
            measurements.set_u32("max_area_sq_ft", max);
        }
        measurements.order_range("min_area_sq_ft", "max_area_sq_ft");
    }
}

/// Area extractor.
pub struct AreaExtractor {
    at_least: Regex,
    bare_range: Regex,
    upper_bound: Regex,
}

impl AreaExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // "at least 100 square feet", "at least 100 to 200 square feet"
            at_least: Regex::new(&format!(
                r"(?i)\bat\s+least\s+{QUANTITY}\s*(?:(?:to|-)\s*{QUANTITY}\s*)?{SQUARE_FEET}"
            ))?,
            bare_range: Regex::new(&format!(
                r"(?i)\b{QUANTITY}\s*(?:to|-)\s*{QUANTITY}\s*{SQUARE_FEET}"
            ))?,
            upper_bound: Regex::new(&format!(
                r"(?i)\b(?:no\s+more\s+than|not\s+(?:to\s+)?exceed(?:ing)?|maximum\s+of|up\s+to)\s+{QUANTITY}\s*{SQUARE_FEET}"
            ))?,
        })
    }
}

impl FieldExtractor for AreaExtractor {
    const NAME: &'static str = "area";
    type Output = AreaRange;

    fn extract(&self, block: &BlockText<'_>) -> Option<AreaRange> {
        let text = block.text;
        let mut area = AreaRange::default();

        if let Some(caps) = self.at_least.captures(text) {
            area.min = parse_count(&caps[1]);
            area.max = caps.get(2).and_then(|m| parse_count(m.as_str()));
        } else if let Some(caps) = self.bare_range.captures(text) {
            area.min = parse_count(&caps[1]);
            area.max = parse_count(&caps[2]);
        }

        if area.max.is_none() {
            area.max = self
                .upper_bound
                .captures(text)
                .and_then(|caps| parse_count(&caps[1]));
        }

        (area.min.is_some() || area.max.is_some()).then_some(area)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Option<AreaRange> {
        AreaExtractor::new().unwrap().extract(&BlockText::new(text))
    }

    #[test]
    fn test_minimum_and_separate_maximum() {
        assert_eq!(
            extract("at least 10 square feet and no more than 100 square feet"),
            Some(AreaRange { min: Some(10), max: Some(100) })
        );
    }

    #[test]
    fn test_inline_range_with_separators() {
        assert_eq!(
            extract("The search area must be at least 1,000 to 2,000 square feet."),
            Some(AreaRange { min: Some(1000), max: Some(2000) })
        );
    }

    #[test]
    fn test_bare_range() {
        assert_eq!(
            extract("Search area: 100 - 200 sq ft"),
            Some(AreaRange { min: Some(100), max: Some(200) })
        );
    }

    #[test]
    fn test_no_area() {
        assert_eq!(extract("The search area is defined by the judge."), None);
    }

    #[test]
    fn test_inverted_range_is_ordered() {
        let range = extract("at least 400 to 200 square feet").unwrap();
        let mut m = Measurements::new();
        range.write_to(&mut m);
        assert_eq!(m.get_u64("min_area_sq_ft"), Some(200));
        assert_eq!(m.get_u64("max_area_sq_ft"), Some(400));
    }
}
