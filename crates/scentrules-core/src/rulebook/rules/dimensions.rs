//! Hide height and container spacing extraction.
//!
//! Both quantities are inch measurements, told apart only by the word that
//! introduces them, so each extractor looks for its keyword first and then
//! for a measurement later in the same sentence.

use regex::{Captures, Regex};

use super::patterns::{sentences, INCHES, INCH_MEASURE};
use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

/// Find an inch measurement that follows `keyword` within one sentence.
fn measure_after_keyword<'t>(keyword: &Regex, sentence: &'t str) -> Option<(usize, Captures<'t>)> {
    let kw = keyword.find(sentence)?;
    let rest = &sentence[kw.end()..];
    let caps = INCH_MEASURE.captures(rest)?;
    let start = kw.end() + caps.get(0).map_or(0, |m| m.start());
    Some((start, caps))
}

/// Hide height bounds in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeightRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl IntoMeasurements for HeightRange {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_u32("min_height_inches", self.min);
        if let Some(max) = self.max {
            measurements.set_u32("max_height_inches", max);
        }
        measurements.order_range("min_height_inches", "max_height_inches");
    }
}

/// Height extractor: only counts inches introduced by height/tall/high.
pub struct HeightExtractor {
    keyword: Regex,
}

impl HeightExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            keyword: Regex::new(r"(?i)\b(?:height|tall|high)\b")?,
        })
    }
}

impl FieldExtractor for HeightExtractor {
    const NAME: &'static str = "height";
    type Output = HeightRange;

    fn extract(&self, block: &BlockText<'_>) -> Option<HeightRange> {
        sentences(block.text).find_map(|sentence| {
            let (_, caps) = measure_after_keyword(&self.keyword, sentence)?;
            Some(HeightRange {
                min: caps[1].parse().ok()?,
                max: caps.get(2).and_then(|m| m.as_str().parse().ok()),
            })
        })
    }
}

/// Container spacing in inches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spacing {
    pub inches: u32,
    /// The rulebook states this as a lower bound ("at least 24 inches apart").
    pub minimum: bool,
}

impl IntoMeasurements for Spacing {
    fn write_to(self, measurements: &mut Measurements) {
        let key = if self.minimum {
            "min_spacing_inches"
        } else {
            "container_spacing_inches"
        };
        measurements.set_u32(key, self.inches);
    }
}

/// Spacing extractor: inches introduced by distance/spacing/apart, or "N inches apart".
pub struct SpacingExtractor {
    keyword: Regex,
    trailing_apart: Regex,
    minimum: Regex,
}

impl SpacingExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            keyword: Regex::new(r"(?i)\b(?:distance|spacing|apart)\b")?,
            trailing_apart: Regex::new(&format!(r"(?i)\b(\d+){INCHES}\s*apart\b"))?,
            minimum: Regex::new(
                r"(?i)\b(?:at\s+least|minimum(?:\s+of)?|no\s+less\s+than|no\s+closer\s+than)\s*$",
            )?,
        })
    }

    fn is_minimum(&self, sentence: &str, number_start: usize) -> bool {
        self.minimum.is_match(&sentence[..number_start])
    }
}

impl FieldExtractor for SpacingExtractor {
    const NAME: &'static str = "spacing";
    type Output = Spacing;

    fn extract(&self, block: &BlockText<'_>) -> Option<Spacing> {
        sentences(block.text).find_map(|sentence| {
            let (start, inches) = match self.trailing_apart.captures(sentence) {
                Some(caps) => (caps.get(0)?.start(), caps[1].parse().ok()?),
                None => {
                    let (start, caps) = measure_after_keyword(&self.keyword, sentence)?;
                    (start, caps[1].parse().ok()?)
                }
            };
            Some(Spacing {
                inches,
                minimum: self.is_minimum(sentence, start),
            })
        })
    }
}
