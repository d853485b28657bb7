//! Leash and container equipment extraction.

use regex::Regex;

use super::patterns::{parse_count, COUNT};
use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

/// Maximum leash length in feet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeashLength(pub u32);

impl IntoMeasurements for LeashLength {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_u32("max_leash_length_feet", self.0);
    }
}

/// "N foot leash" extractor.
pub struct LeashExtractor {
    leash: Regex,
}

impl LeashExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // "6 foot leash", "6-foot flat leash", "six feet long leash"
            leash: Regex::new(&format!(
                r"(?i)\b{COUNT}\s*(?:-\s*)?(?:foot|feet|ft\.?)\s+(?:long\s+)?(?:[a-z]+\s+)?leash"
            ))?,
        })
    }
}

impl FieldExtractor for LeashExtractor {
    const NAME: &'static str = "leash";
    type Output = LeashLength;

    fn extract(&self, block: &BlockText<'_>) -> Option<LeashLength> {
        self.leash
            .captures(block.text)
            .and_then(|caps| parse_count(&caps[1]))
            .map(LeashLength)
    }
}

/// Number of containers in a container search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerCount(pub u32);

impl IntoMeasurements for ContainerCount {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_u32("num_containers", self.0);
    }
}

/// "N [identical] [cardboard] [box] containers" extractor.
pub struct ContainerCountExtractor {
    containers: Regex,
}

impl ContainerCountExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            containers: Regex::new(&format!(
                r"(?i)\b{COUNT}\s+(?:identical\s+)?(?:cardboard\s+)?(?:box\s+)?containers\b"
            ))?,
        })
    }
}

impl FieldExtractor for ContainerCountExtractor {
    const NAME: &'static str = "container_count";
    type Output = ContainerCount;

    fn extract(&self, block: &BlockText<'_>) -> Option<ContainerCount> {
        self.containers
            .captures(block.text)
            .and_then(|caps| parse_count(&caps[1]))
            .map(ContainerCount)
    }
}

/// Kind of containers used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerType(pub String);

impl IntoMeasurements for ContainerType {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_str("container_type", self.0);
    }
}

/// Container type extractor.
pub struct ContainerTypeExtractor {
    identical: Regex,
    various: Regex,
}

impl ContainerTypeExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            identical: Regex::new(r"(?i)\bidentical\s+cardboard\s+box(?:es)?\b")?,
            various: Regex::new(r"(?i)\bvarious\s+sizes?\s+and\s+types?\b")?,
        })
    }
}

impl FieldExtractor for ContainerTypeExtractor {
    const NAME: &'static str = "container_type";
    type Output = ContainerType;

    fn extract(&self, block: &BlockText<'_>) -> Option<ContainerType> {
        let label = if self.identical.is_match(block.text) {
            "identical cardboard boxes"
        } else if self.various.is_match(block.text) {
            "various sizes and types"
        } else {
            return None;
        };
        Some(ContainerType(label.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(text: &str) -> BlockText<'_> {
        BlockText::new(text)
    }

    #[test]
    fn test_leash_length() {
        let extractor = LeashExtractor::new().unwrap();
        assert_eq!(
            extractor.extract(&block("Dogs must be on a 6 foot leash.")),
            Some(LeashLength(6))
        );
        assert_eq!(
            extractor.extract(&block("a six-foot flat leash or shorter")),
            Some(LeashLength(6))
        );
        assert_eq!(extractor.extract(&block("A leash is optional.")), None);
    }

    #[test]
    fn test_container_count() {
        let extractor = ContainerCountExtractor::new().unwrap();
        assert_eq!(
            extractor.extract(&block("15 identical cardboard box containers")),
            Some(ContainerCount(15))
        );
        assert_eq!(
            extractor.extract(&block("There will be 20 containers.")),
            Some(ContainerCount(20))
        );
        assert_eq!(extractor.extract(&block("Containers are supplied by the club.")), None);
    }

    #[test]
    fn test_container_type() {
        let extractor = ContainerTypeExtractor::new().unwrap();
        assert_eq!(
            extractor.extract(&block("All identical cardboard boxes.")),
            Some(ContainerType("identical cardboard boxes".to_string()))
        );
        assert_eq!(
            extractor.extract(&block("Containers of various size and type may be used.")),
            Some(ContainerType("various sizes and types".to_string()))
        );
        assert_eq!(extractor.extract(&block("Plastic bins.")), None);
    }
}
