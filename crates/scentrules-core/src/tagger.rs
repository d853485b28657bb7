//! Keyword and category tagging.

use std::collections::BTreeSet;

use crate::models::rule::{Category, Element, Level};

/// Domain terms collected as keywords when present in a block.
pub const KEYWORD_VOCABULARY: [&str; 26] = [
    "hide",
    "leash",
    "fault",
    "qualification",
    "qualifying",
    "odor",
    "alert",
    "finish",
    "time",
    "area",
    "container",
    "interior",
    "exterior",
    "buried",
    "distraction",
    "handler",
    "judge",
    "score",
    "elimination",
    "title",
    "threshold",
    "start line",
    "equipment",
    "collar",
    "harness",
    "reward",
];

/// Category tests in decision order. The first entry with any matching term wins.
pub const CATEGORY_RULES: [(&[&str], Category); 7] = [
    (&["area", "size"], Category::SearchArea),
    (&["time", "limit"], Category::TimeLimit),
    (&["hide"], Category::Hides),
    (&["leash", "equipment"], Category::Equipment),
    (&["handler", "conduct"], Category::HandlerRequirements),
    (&["judge", "score"], Category::Judging),
    (&["fault", "elimination"], Category::FaultsAndEliminations),
];

/// Derives keywords and a category from fixed vocabularies.
#[derive(Debug, Clone)]
pub struct Tagger {
    vocabulary: Vec<&'static str>,
    categories: Vec<(&'static [&'static str], Category)>,
}

impl Default for Tagger {
    fn default() -> Self {
        Self::new()
    }
}

impl Tagger {
    pub fn new() -> Self {
        Self {
            vocabulary: KEYWORD_VOCABULARY.to_vec(),
            categories: CATEGORY_RULES.to_vec(),
        }
    }

    /// Keywords: the block's level and element, plus vocabulary terms found in `content`.
    pub fn keywords(
        &self,
        content: &str,
        level: Option<Level>,
        element: Option<Element>,
    ) -> BTreeSet<String> {
        let lower = content.to_lowercase();
        let mut keywords = BTreeSet::new();

        if let Some(level) = level {
            keywords.insert(level.name().to_lowercase());
        }
        if let Some(element) = element {
            keywords.insert(element.name().to_lowercase());
        }

        keywords.extend(
            self.vocabulary
                .iter()
                .filter(|term| lower.contains(**term))
                .map(|term| (*term).to_string()),
        );

        keywords
    }

    /// First category in decision order whose terms appear in `content`.
    pub fn category(&self, content: &str) -> Category {
        let lower = content.to_lowercase();
        self.categories
            .iter()
            .find(|(terms, _)| terms.iter().any(|term| lower.contains(term)))
            .map_or(Category::General, |(_, category)| *category)
    }
}
