//! Hide count extraction.
//!
//! Hide counts appear in several shapes: Master-level narrative prose, a
//! four-column table with one entry per level, an explicit "Hides:" label,
//! and bare counts in running text. Shapes are tried in that order and the
//! first one found wins.

use regex::Regex;

use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::{Level, Measurements};

/// Hide count range, and whether the handler is told the number of hides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HideCount {
    pub min: u32,
    pub max: u32,
    pub known: Option<bool>,
}

impl HideCount {
    /// Build a range, ordering the bounds.
    pub fn range(a: u32, b: u32) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
            known: None,
        }
    }

    pub fn exact(n: u32) -> Self {
        Self::range(n, n)
    }

    pub fn with_known(mut self, known: bool) -> Self {
        self.known = Some(known);
        self
    }
}

impl IntoMeasurements for HideCount {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_u32("min_hides", self.min);
        measurements.set_u32("max_hides", self.max);
        if let Some(known) = self.known {
            measurements.set_bool("hides_known", known);
        }
    }
}

/// Hide count extractor.
pub struct HideCountExtractor {
    narrative: Regex,
    unknown_word: Regex,
    table_row: Regex,
    explicit: Regex,
    bare_range: Regex,
    bare_count: Regex,
    spacing_suffix: Regex,
    unknown_signal: Regex,
    known_signal: Regex,
    hide_word: Regex,
    infer_known: bool,
}

impl HideCountExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            narrative: Regex::new(
                r"(?i)\bone,\s*two,\s*three,?\s*or\s+four\b(?:\s+of\s+the\s+(?:boxes|hides|containers))?",
            )?,
            unknown_word: Regex::new(r"(?i)\bunknown\b")?,
            // "1 (Known)", "1-4 (Unknown)"
            table_row: Regex::new(r"(?i)\b(\d+)(?:\s*-\s*(\d+))?\s*\(\s*(known|unknown)\s*\)")?,
            // "Hides: 2-3 Known"
            explicit: Regex::new(
                r"(?i)\bhides?\s*:\s*(\d+)(?:\s*(?:-|to)\s*(\d+))?\s*\(?\s*(known|unknown)\b",
            )?,
            bare_range: Regex::new(r"(?i)\b(\d+)\s*(?:-|to)\s*(\d+)\s+hides\b")?,
            bare_count: Regex::new(r"(?i)\b(\d+)\s+(?:([a-z]+)\s+)?hides?\b")?,
            spacing_suffix: Regex::new(r"(?i)^\s*(?:inch(?:es)?|apart)\b")?,
            unknown_signal: Regex::new(
                r"(?i)\bunknown\s+number\b|\bnumber\b[^.]{0,60}?\bunknown\b|\(\s*unknown\s*\)",
            )?,
            known_signal: Regex::new(r"(?i)\(\s*known\s*\)")?,
            hide_word: Regex::new(r"(?i)\bhides?\b")?,
            infer_known: true,
        })
    }

    /// Enable or disable the `hides_known` inference for bare counts.
    pub fn with_knowledge_inference(mut self, enabled: bool) -> Self {
        self.infer_known = enabled;
        self
    }

    // "one, two, three, or four of the boxes" only shows up in Master prose,
    // which never states a numeric range.
    fn narrative(&self, text: &str) -> Option<HideCount> {
        if self.narrative.is_match(text) && self.unknown_word.is_match(text) {
            Some(HideCount::range(1, 4).with_known(false))
        } else {
            None
        }
    }

    fn table_row(&self, text: &str, level: Option<Level>) -> Option<HideCount> {
        let rows: Vec<HideCount> = self
            .table_row
            .captures_iter(text)
            .filter_map(|caps| parse_flagged(&caps))
            .collect();

        let last = rows.len().checked_sub(1)?;
        let index = match level {
            Some(level) => level.table_index().min(last),
            None => last,
        };
        rows.get(index).copied()
    }

    fn explicit(&self, text: &str) -> Option<HideCount> {
        self.explicit
            .captures(text)
            .and_then(|caps| parse_flagged(&caps))
    }

    fn bare_range(&self, text: &str) -> Option<HideCount> {
        let caps = self.bare_range.captures(text)?;
        Some(HideCount::range(caps[1].parse().ok()?, caps[2].parse().ok()?))
    }

    fn bare_count(&self, text: &str) -> Option<HideCount> {
        self.bare_count.captures_iter(text).find_map(|caps| {
            let digits = caps.get(1)?;
            if self.spacing_suffix.is_match(&text[digits.end()..]) {
                return None;
            }
            digits.as_str().parse().ok().map(HideCount::exact)
        })
    }

    fn infer_knowledge(&self, text: &str) -> Option<bool> {
        if self.unknown_signal.is_match(text) {
            Some(false)
        } else if self.known_signal.is_match(text) || self.hide_word.is_match(text) {
            Some(true)
        } else {
            None
        }
    }
}

/// Build a count from captures shaped `(n)(m)?(known|unknown)`.
fn parse_flagged(caps: &regex::Captures<'_>) -> Option<HideCount> {
    let min: u32 = caps[1].parse().ok()?;
    let max: u32 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => min,
    };
    let known = caps[3].eq_ignore_ascii_case("known");
    Some(HideCount::range(min, max).with_known(known))
}

impl FieldExtractor for HideCountExtractor {
    const NAME: &'static str = "hide_count";
    type Output = HideCount;

    fn extract(&self, block: &BlockText<'_>) -> Option<HideCount> {
        let text = block.text;

        let mut count = self
            .narrative(text)
            .or_else(|| self.table_row(text, block.level))
            .or_else(|| self.explicit(text))
            .or_else(|| self.bare_range(text))
            .or_else(|| self.bare_count(text))?;

        if count.known.is_none() && self.infer_known {
            count.known = self.infer_knowledge(text);
        }

        Some(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const TABLE: &str = "Hides: 1 (Known)   2 (Known)   3 (Known)   1-4 (Unknown)";

    fn extract(text: &str, level: Option<Level>) -> Option<HideCount> {
        HideCountExtractor::new()
            .unwrap()
            .extract(&BlockText::new(text).with_level(level))
    }

    #[test]
    fn test_table_master_column() {
        assert_eq!(
            extract(TABLE, Some(Level::Master)),
            Some(HideCount { min: 1, max: 4, known: Some(false) })
        );
    }

    #[test]
    fn test_table_novice_column() {
        assert_eq!(
            extract(TABLE, Some(Level::Novice)),
            Some(HideCount { min: 1, max: 1, known: Some(true) })
        );
    }

    #[test]
    fn test_table_known_range_at_level_index() {
        let text = "Hides: 1 (Known)  1-2 (Known)  2-3 (Known)  1-4 (Unknown)";
        assert_eq!(
            extract(text, Some(Level::Excellent)),
            Some(HideCount { min: 2, max: 3, known: Some(true) })
        );
        assert_eq!(
            extract(text, Some(Level::Advanced)),
            Some(HideCount { min: 1, max: 2, known: Some(true) })
        );
    }

    #[test]
    fn test_table_clamps_to_last_entry() {
        let text = "Hides: 1 (Known)  2 (Known)";
        assert_eq!(
            extract(text, Some(Level::Master)),
            Some(HideCount { min: 2, max: 2, known: Some(true) })
        );
    }

    #[test]
    fn test_table_without_level_uses_last_entry() {
        assert_eq!(
            extract(TABLE, None),
            Some(HideCount { min: 1, max: 4, known: Some(false) })
        );
    }

    #[test]
    fn test_narrative_master_prose() {
        let text = "There may be one, two, three, or four of the boxes containing hides. \
                    The number of hides is unknown to the handler.";
        assert_eq!(
            extract(text, Some(Level::Master)),
            Some(HideCount { min: 1, max: 4, known: Some(false) })
        );
    }

    #[test]
    fn test_narrative_requires_unknown() {
        let text = "Choose one, two, three, or four stewards.";
        assert_eq!(extract(text, None), None);
    }

    #[test]
    fn test_explicit_label_without_parentheses() {
        assert_eq!(
            extract("Hides: 2-3 Unknown", None),
            Some(HideCount { min: 2, max: 3, known: Some(false) })
        );
    }

    #[test]
    fn test_bare_range_defaults_known() {
        assert_eq!(
            extract("The search will contain 1-3 hides.", None),
            Some(HideCount { min: 1, max: 3, known: Some(true) })
        );
    }

    #[test]
    fn test_bare_range_with_unknown_number() {
        assert_eq!(
            extract("There will be 2 to 4 hides; the number of hides is unknown.", None),
            Some(HideCount { min: 2, max: 4, known: Some(false) })
        );
    }

    #[test]
    fn test_bare_count() {
        assert_eq!(
            extract("Each search has 1 hide placed by the judge.", None),
            Some(HideCount { min: 1, max: 1, known: Some(true) })
        );
        assert_eq!(
            extract("There will be 3 odor hides in the area.", None),
            Some(HideCount { min: 3, max: 3, known: Some(true) })
        );
    }

    #[test]
    fn test_bare_count_ignores_spacing_numbers() {
        assert_eq!(extract("Place containers 24 inches apart before hides go out.", None), None);
    }

    #[test]
    fn test_inference_can_be_disabled() {
        let extractor = HideCountExtractor::new().unwrap().with_knowledge_inference(false);
        assert_eq!(
            extractor.extract(&BlockText::new("The search will contain 1-3 hides.")),
            Some(HideCount { min: 1, max: 3, known: None })
        );
    }

    #[test]
    fn test_no_hides() {
        assert_eq!(extract("Handlers may use a flat collar.", None), None);
    }

    #[test]
    fn test_max_never_below_min() {
        let count = extract("Hides: 4-1 (Unknown)", None).unwrap();
        assert!(count.max >= count.min);
    }
}
