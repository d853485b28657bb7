//! Container arrangement extraction.

use regex::Regex;

use super::patterns::{parse_count, COUNT};
use super::{BlockText, FieldExtractor, IntoMeasurements};
use crate::error::Result;
use crate::models::rule::Measurements;

/// Container layout description. Clauses accumulate in the order found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerArrangement(pub Vec<String>);

impl IntoMeasurements for ContainerArrangement {
    fn write_to(self, measurements: &mut Measurements) {
        measurements.set_str("container_arrangement", self.0.join("; "));
    }
}

/// Arrangement extractor: "N rows of M", circle formation, "U" formation.
pub struct ArrangementExtractor {
    rows: Regex,
    circle: Regex,
    formation: Regex,
    u_shape: Regex,
}

impl ArrangementExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            rows: Regex::new(&format!(r"(?i)\b{COUNT}\s+rows?\s+of\s+{COUNT}\b"))?,
            circle: Regex::new(r"(?i)\bcircle\b")?,
            formation: Regex::new(r"(?i)\bformation\b")?,
            u_shape: Regex::new(r#"["“”']U["“”']\s*(?:-\s*)?(?:shaped\s+)?formation\b"#)?,
        })
    }
}

impl FieldExtractor for ArrangementExtractor {
    const NAME: &'static str = "container_arrangement";
    type Output = ContainerArrangement;

    fn extract(&self, block: &BlockText<'_>) -> Option<ContainerArrangement> {
        let text = block.text;
        let mut clauses: Vec<String> = Vec::new();

        for caps in self.rows.captures_iter(text) {
            if let (Some(rows), Some(per_row)) = (parse_count(&caps[1]), parse_count(&caps[2])) {
                let clause = format!("{rows} rows of {per_row}");
                if !clauses.contains(&clause) {
                    clauses.push(clause);
                }
            }
        }

        if self.circle.is_match(text) && self.formation.is_match(text) {
            clauses.push("circle formation".to_string());
        }

        if self.u_shape.is_match(text) {
            clauses.push("U formation".to_string());
        }

        (!clauses.is_empty()).then_some(ContainerArrangement(clauses))
    }
}
