//! Required handler call extraction ("must call Alert", "must call Finish").

use regex::Regex;

use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

/// Calls the handler is required to make.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequiredCalls(pub Vec<String>);

impl IntoMeasurements for RequiredCalls {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_list("required_calls", self.0);
    }
}

/// Required call extractor.
pub struct RequiredCallExtractor {
    calls: Vec<(&'static str, Regex)>,
}

impl RequiredCallExtractor {
    pub fn new() -> Result<Self> {
        let calls = ["Alert", "Finish"]
            .into_iter()
            .map(|call| Ok((call, Regex::new(&format!(r"(?i)\bmust\s+call\b[^.]*?\b{call}\b"))?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { calls })
    }
}

impl FieldExtractor for RequiredCallExtractor {
    const NAME: &'static str = "required_calls";
    type Output = RequiredCalls;

    fn extract(&self, block: &BlockText<'_>) -> Option<RequiredCalls> {
        let calls: Vec<String> = self
            .calls
            .iter()
            .filter(|(_, pattern)| pattern.is_match(block.text))
            .map(|(call, _)| (*call).to_string())
            .collect();

        (!calls.is_empty()).then_some(RequiredCalls(calls))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_both_calls() {
        let extractor = RequiredCallExtractor::new().unwrap();
        let calls = extractor
            .extract(&BlockText::new(
                "The handler must call \"Finish\" when done and must call \"Alert\" on each hide.",
            ))
            .unwrap();
        assert_eq!(calls.0, vec!["Alert", "Finish"]);
    }

    #[test]
    fn test_call_must_be_in_same_sentence() {
        let extractor = RequiredCallExtractor::new().unwrap();
        assert_eq!(
            extractor.extract(&BlockText::new("The handler must call the judge. Alert is optional.")),
            None
        );
    }
}
