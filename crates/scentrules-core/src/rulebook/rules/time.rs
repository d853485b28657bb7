//! Search time limit and time warning extraction.

use regex::Regex;

use super::patterns::{parse_count, COUNT};
use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

/// Search time limit in minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeLimit(pub u32);

impl IntoMeasurements for TimeLimit {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_u32("time_limit_minutes", self.0);
    }
}

/// Time limit extractor. The first "N minute(s)" phrase wins.
pub struct TimeLimitExtractor {
    minutes: Regex,
}

impl TimeLimitExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            minutes: Regex::new(&format!(r"(?i)\b{COUNT}\s*(?:-\s*)?minutes?\b"))?,
        })
    }
}

impl FieldExtractor for TimeLimitExtractor {
    const NAME: &'static str = "time_limit";
    type Output = TimeLimit;

    fn extract(&self, block: &BlockText<'_>) -> Option<TimeLimit> {
        self.minutes
            .captures_iter(block.text)
            .find_map(|caps| parse_count(&caps[1]))
            .map(TimeLimit)
    }
}

/// Warning given before time expires, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning(pub u32);

impl IntoMeasurements for Warning {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_u32("warning_seconds", self.0);
    }
}

/// "N second warning" extractor.
pub struct WarningExtractor {
    warning: Regex,
}

impl WarningExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            warning: Regex::new(&format!(r"(?i)\b{COUNT}\s*(?:-\s*)?seconds?\s+warning\b"))?,
        })
    }
}

impl FieldExtractor for WarningExtractor {
    const NAME: &'static str = "warning";
    type Output = Warning;

    fn extract(&self, block: &BlockText<'_>) -> Option<Warning> {
        self.warning
            .captures(block.text)
            .and_then(|caps| parse_count(&caps[1]))
            .map(Warning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minutes(text: &str) -> Option<TimeLimit> {
        TimeLimitExtractor::new().unwrap().extract(&BlockText::new(text))
    }

    #[test]
    fn test_spelled_out_minutes() {
        assert_eq!(minutes("two minutes"), Some(TimeLimit(2)));
        assert_eq!(minutes("Time limit: Three Minutes"), Some(TimeLimit(3)));
    }

    #[test]
    fn test_numeric_and_hyphenated_minutes() {
        assert_eq!(minutes("a 4-minute search"), Some(TimeLimit(4)));
        assert_eq!(minutes("1 minute"), Some(TimeLimit(1)));
    }

    #[test]
    fn test_first_mention_wins() {
        assert_eq!(
            minutes("Time: 2 minutes. Teams may walk the area for 5 minutes."),
            Some(TimeLimit(2))
        );
    }

    #[test]
    fn test_no_minutes() {
        assert_eq!(minutes("Time will be set by the judge."), None);
    }

    #[test]
    fn test_warning_seconds() {
        let extractor = WarningExtractor::new().unwrap();
        assert_eq!(
            extractor.extract(&BlockText::new("The timer gives a 30 second warning.")),
            Some(Warning(30))
        );
        assert_eq!(
            extractor.extract(&BlockText::new("a 30-second warning will be called")),
            Some(Warning(30))
        );
        assert_eq!(extractor.extract(&BlockText::new("30 seconds remain")), None);
    }
}
