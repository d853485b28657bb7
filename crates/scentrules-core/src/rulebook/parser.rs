//! Rulebook parser driving segmentation, classification, extraction and tagging.

use std::collections::BTreeSet;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::rules::patterns::normalize_whitespace;
use super::rules::{BlockText, MeasurementCascade};
use crate::classify::Classifier;
use crate::error::Result;
use crate::merge::{self, AuthoritativeMeasurements};
use crate::models::config::RulebookConfig;
use crate::models::rule::{Element, Level, MeasurementsSource, Rule};
use crate::segment::{Chapter, ClassBlock, ClassRequirementLocator, Section, Segmenter};
use crate::tagger::Tagger;

/// Result of one parsing pass.
#[derive(Debug, Clone)]
pub struct ParseOutcome {
    /// Rules in document order.
    pub rules: Vec<Rule>,
    /// Non-fatal diagnostics.
    pub warnings: Vec<String>,
    /// Section and class-block candidates discarded as too short or repeated.
    pub skipped_blocks: usize,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

impl ParseOutcome {
    /// Merge authoritative measurements over the parsed rules.
    ///
    /// A missing dataset is recorded as a warning and leaves every rule parsed.
    pub fn apply_overrides(&mut self, dataset: Option<&AuthoritativeMeasurements>) -> usize {
        match dataset {
            Some(dataset) => {
                self.warnings.extend(
                    dataset
                        .ignored()
                        .iter()
                        .map(|key| format!("Ignored unknown override entry '{key}'")),
                );
            }
            None => self
                .warnings
                .push("No authoritative measurements; all measurements are parsed".to_string()),
        }

        merge::apply_overrides(&mut self.rules, dataset)
    }

    /// Number of rules carrying authoritative measurements.
    pub fn authoritative_count(&self) -> usize {
        self.rules
            .iter()
            .filter(|r| r.measurements_source == MeasurementsSource::Authoritative)
            .count()
    }

    /// Serialize the rule list as a JSON array.
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let json = if pretty {
            serde_json::to_string_pretty(&self.rules)?
        } else {
            serde_json::to_string(&self.rules)?
        };
        Ok(json)
    }
}

/// Turns rulebook text into rule records.
///
/// All patterns are compiled once in [`RulebookParser::new`] and reused for
/// every block, so one parser can process any number of documents.
pub struct RulebookParser {
    segmenter: Segmenter,
    locator: ClassRequirementLocator,
    classifier: Classifier,
    cascade: MeasurementCascade,
    tagger: Tagger,
}

impl RulebookParser {
    pub fn new(config: &RulebookConfig) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::new(&config.segmentation)?,
            locator: ClassRequirementLocator::new(&config.segmentation)?,
            classifier: Classifier::new()?,
            cascade: MeasurementCascade::new(&config.extraction)?,
            tagger: Tagger::new(),
        })
    }

    /// Parse pages of extracted text, joined in page order.
    pub fn parse_pages<S: AsRef<str>>(&self, pages: &[S]) -> Result<ParseOutcome> {
        let text = pages.iter().map(AsRef::as_ref).collect::<Vec<_>>().join("\n");
        self.parse(&text)
    }

    /// Parse the full document text.
    pub fn parse(&self, text: &str) -> Result<ParseOutcome> {
        let start = Instant::now();
        let mut rules = Vec::new();
        let mut warnings = Vec::new();
        let mut skipped_blocks = 0;
        // Each (element, level) class has one requirements block: the first in the document
        let mut seen_classes: BTreeSet<(Element, Level)> = BTreeSet::new();

        info!("Parsing rulebook from {} characters of text", text.len());

        for chapter in self.segmenter.chapters(text) {
            let sections = self.segmenter.sections(&chapter);
            let blocks = self.locator.locate(&chapter);
            let skipped = sections.skipped + blocks.skipped;

            debug!(
                chapter = ?chapter.number,
                sections = sections.items.len(),
                class_blocks = blocks.items.len(),
                skipped,
                "segmented chapter"
            );

            if skipped > 0 {
                let label = chapter.label().unwrap_or_else(|| "Document".to_string());
                warnings.push(format!("{label}: skipped {skipped} short block(s)"));
                skipped_blocks += skipped;
            }

            rules.extend(sections.items.iter().map(|s| self.section_rule(&chapter, s)));

            for block in &blocks.items {
                if !seen_classes.insert((block.element, block.level)) {
                    debug!(chapter = ?chapter.number, class = %block.title(), "skipping repeated class block");
                    warnings.push(format!(
                        "{}: ignored repeated {} block",
                        chapter.label().unwrap_or_else(|| "Document".to_string()),
                        block.title()
                    ));
                    skipped_blocks += 1;
                    continue;
                }
                rules.push(self.class_rule(&chapter, block));
            }
        }

        if rules.is_empty() {
            warn!("no rules found in document");
            warnings.push("No rules found in document".to_string());
        }

        info!(
            rules = rules.len(),
            skipped = skipped_blocks,
            "parsed rulebook in {} ms",
            start.elapsed().as_millis()
        );

        Ok(ParseOutcome {
            rules,
            warnings,
            skipped_blocks,
            processing_time_ms: start.elapsed().as_millis() as u64,
        })
    }

    fn section_rule(&self, chapter: &Chapter, section: &Section) -> Rule {
        let title = normalize_whitespace(&section.title);
        let id = match chapter.label() {
            Some(label) => format!("{label}, Section {}", section.number),
            None => format!("Section {}", section.number),
        };
        let (level, element) = self.classifier.classify(&title, &section.content);

        self.build_rule(id, title, &section.content, level, element)
    }

    // The class header names the element and level, so the classifier is not consulted.
    fn class_rule(&self, chapter: &Chapter, block: &ClassBlock) -> Rule {
        let title = block.title();
        let id = match chapter.label() {
            Some(label) => format!("{label}: {title}"),
            None => title.clone(),
        };

        self.build_rule(id, title, &block.content, Some(block.level), Some(block.element))
    }

    fn build_rule(
        &self,
        section: String,
        title: String,
        content: &str,
        level: Option<Level>,
        element: Option<Element>,
    ) -> Rule {
        let measurements = self
            .cascade
            .extract(&BlockText::new(content).with_level(level));

        Rule {
            section,
            title,
            content: content.to_string(),
            level,
            element,
            category: self.tagger.category(content),
            keywords: self.tagger.keywords(content, level, element),
            measurements,
            measurements_source: MeasurementsSource::Parsed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::rule::Category;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const HIDE_TABLE: &str = "Hides: 1 (Known)   2 (Known)   3 (Known)   1-4 (Unknown)";

    fn parser() -> RulebookParser {
        RulebookParser::new(&RulebookConfig::default()).unwrap()
    }

    fn class_chapter() -> String {
        format!(
            "Chapter 7. Container Requirements\n\
             Container Novice Class : {HIDE_TABLE}\n\
             Container Master Class : {HIDE_TABLE}\n"
        )
    }

    fn rulebook() -> String {
        format!(
            "Scent Work Regulations\n\
             Chapter 3. Search Areas\n\
             Section 1. Search Area\n\
             The search area must be at least 10 square feet and no more than 100 square feet.\n\
             Section 2. Time\nThe time limit is two minutes.\n\
             Section 3.\n\
             {}",
            class_chapter()
        )
    }

    fn find<'a>(outcome: &'a ParseOutcome, section: &str) -> &'a Rule {
        outcome
            .rules
            .iter()
            .find(|r| r.section == section)
            .unwrap_or_else(|| panic!("no rule for {section}"))
    }

    #[test]
    fn test_master_table_row_uses_last_column() {
        let outcome = parser().parse(&class_chapter()).unwrap();
        let rule = find(&outcome, "Chapter 7: Container Master Class");

        assert_eq!(rule.title, "Container Master Class");
        assert_eq!(rule.level, Some(Level::Master));
        assert_eq!(rule.element, Some(Element::Container));
        assert_eq!(rule.content, HIDE_TABLE);
        assert_eq!(
            serde_json::to_value(&rule.measurements).unwrap(),
            json!({"min_hides": 1, "max_hides": 4, "hides_known": false})
        );
        assert_eq!(rule.category, Category::Hides);
    }

    #[test]
    fn test_novice_table_row_uses_first_column() {
        let outcome = parser().parse(&class_chapter()).unwrap();
        let rule = find(&outcome, "Chapter 7: Container Novice Class");

        assert_eq!(
            serde_json::to_value(&rule.measurements).unwrap(),
            json!({"min_hides": 1, "max_hides": 1, "hides_known": true})
        );
    }

    #[test]
    fn test_section_rules() {
        let outcome = parser().parse(&rulebook()).unwrap();

        let area = find(&outcome, "Chapter 3, Section 1");
        assert_eq!(area.title, "Search Area");
        assert_eq!(area.category, Category::SearchArea);
        assert_eq!(
            serde_json::to_value(&area.measurements).unwrap(),
            json!({"min_area_sq_ft": 10, "max_area_sq_ft": 100})
        );

        let time = find(&outcome, "Chapter 3, Section 2");
        assert_eq!(
            serde_json::to_value(&time.measurements).unwrap(),
            json!({"time_limit_minutes": 2})
        );
        assert_eq!(time.level, None);
        assert_eq!(time.element, None);

        assert_eq!(outcome.skipped_blocks, 1);
        assert_eq!(outcome.warnings, vec!["Chapter 3: skipped 1 short block(s)".to_string()]);
    }

    #[test]
    fn test_rule_order_follows_document() {
        let outcome = parser().parse(&rulebook()).unwrap();
        let sections: Vec<&str> = outcome.rules.iter().map(|r| r.section.as_str()).collect();

        assert_eq!(
            sections,
            vec![
                "Chapter 3, Section 1",
                "Chapter 3, Section 2",
                "Chapter 7: Container Novice Class",
                "Chapter 7: Container Master Class",
            ]
        );
    }

    #[test]
    fn test_output_is_idempotent_and_round_trips() {
        let first = parser().parse(&rulebook()).unwrap().to_json(true).unwrap();
        let second = parser().parse(&rulebook()).unwrap().to_json(true).unwrap();
        assert_eq!(first, second);

        let outcome = parser().parse(&rulebook()).unwrap();
        let back: Vec<Rule> = serde_json::from_str(&outcome.to_json(false).unwrap()).unwrap();
        assert_eq!(back, outcome.rules);
    }

    #[test]
    fn test_hide_ranges_are_ordered() {
        let text = "Section 1. Hides\nHides: 4-1 (Known) are placed by the judge.\n\
                    Section 2. More hides\nThere will be 5 to 2 hides in the area.";
        let outcome = parser().parse(text).unwrap();
        assert_eq!(outcome.rules.len(), 2);

        for rule in &outcome.rules {
            let min = rule.measurements.get_u64("min_hides").unwrap();
            let max = rule.measurements.get_u64("max_hides").unwrap();
            assert!(max >= min, "{}: {min} > {max}", rule.section);
        }
        assert_eq!(outcome.rules[0].section, "Section 1");
    }

    #[test]
    fn test_parse_pages_joins_with_newline() {
        let pages = ["Chapter 3. Search Areas\nSection 2. Time", "The time limit is two minutes."];
        let outcome = parser().parse_pages(&pages).unwrap();

        assert_eq!(outcome.rules.len(), 1);
        assert_eq!(outcome.rules[0].content, "Time\nThe time limit is two minutes.");
    }

    #[test]
    fn test_repeated_class_block_keeps_first() {
        let text = format!(
            "Chapter 4. Overview\n\
             Container Novice Class : {HIDE_TABLE}\n\
             {}\
             Container Novice Class : Hides: 3 (Known) with the same odor in every container.\n",
            class_chapter()
        );
        let outcome = parser().parse(&text).unwrap();

        let novice: Vec<&Rule> = outcome
            .rules
            .iter()
            .filter(|r| r.class_key() == Some((Element::Container, Level::Novice)))
            .collect();
        assert_eq!(novice.len(), 1);
        assert_eq!(novice[0].section, "Chapter 4: Container Novice Class");
        assert_eq!(outcome.skipped_blocks, 2);
        assert_eq!(
            outcome.warnings,
            vec![
                "Chapter 7: ignored repeated Container Novice Class block".to_string(),
                "Chapter 7: ignored repeated Container Novice Class block".to_string(),
            ]
        );
        assert!(outcome
            .rules
            .iter()
            .any(|r| r.section == "Chapter 7: Container Master Class"));
    }

    #[test]
    fn test_empty_document_warns() {
        let outcome = parser().parse("").unwrap();
        assert!(outcome.rules.is_empty());
        assert_eq!(outcome.warnings, vec!["No rules found in document".to_string()]);
    }

    #[test]
    fn test_overrides_mark_rules_authoritative() {
        let mut outcome = parser().parse(&class_chapter()).unwrap();
        let dataset = AuthoritativeMeasurements::from_json_str(
            r#"{"Container": {"Master": {"min_hides": 1, "max_hides": 4}}, "Trailer": {}}"#,
        )
        .unwrap();

        assert_eq!(outcome.apply_overrides(Some(&dataset)), 1);
        assert_eq!(outcome.authoritative_count(), 1);
        assert_eq!(
            outcome.warnings,
            vec!["Ignored unknown override entry 'Trailer'".to_string()]
        );

        let master = find(&outcome, "Chapter 7: Container Master Class");
        assert_eq!(master.measurements_source, MeasurementsSource::Authoritative);
    }

    #[test]
    fn test_missing_overrides_warn() {
        let mut outcome = parser().parse(&class_chapter()).unwrap();
        assert_eq!(outcome.apply_overrides(None), 0);
        assert_eq!(outcome.authoritative_count(), 0);
        assert_eq!(outcome.warnings.len(), 1);
    }
}
