//! Level and element classification of text blocks.

use regex::Regex;
use tracing::trace;

use crate::error::Result;
use crate::models::rule::{Element, Level};

/// Order in which element patterns are tested.
pub const ELEMENT_ORDER: [Element; 4] = [
    Element::Interior,
    Element::Exterior,
    Element::Container,
    Element::Buried,
];

/// Assigns an optional level and element to a block.
///
/// Each label has one whole-word, case-insensitive pattern. Patterns are
/// tested in a fixed order and the first match wins; a block mentioning
/// several levels keeps the earliest one in that order.
pub struct Classifier {
    levels: Vec<(Level, Regex)>,
    elements: Vec<(Element, Regex)>,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let levels = Level::ALL
            .into_iter()
            .map(|level| Ok((level, word_pattern(level.name())?)))
            .collect::<Result<Vec<_>>>()?;

        let elements = ELEMENT_ORDER
            .into_iter()
            .map(|element| Ok((element, word_pattern(element.name())?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { levels, elements })
    }

    /// Classify the level of `title + " " + content`.
    pub fn level(&self, title: &str, content: &str) -> Option<Level> {
        first_match(&self.levels, &format!("{title} {content}"))
    }

    /// Classify the element of `title + " " + content`.
    pub fn element(&self, title: &str, content: &str) -> Option<Element> {
        first_match(&self.elements, &format!("{title} {content}"))
    }

    /// Classify both labels at once.
    pub fn classify(&self, title: &str, content: &str) -> (Option<Level>, Option<Element>) {
        (self.level(title, content), self.element(title, content))
    }
}

/// Whole-word pattern for a label, accepting a trailing plural "s".
fn word_pattern(name: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"(?i)\b{}s?\b", regex::escape(name)))?)
}

fn first_match<T: Copy + std::fmt::Debug>(patterns: &[(T, Regex)], text: &str) -> Option<T> {
    let mut matches = patterns.iter().filter(|(_, p)| p.is_match(text)).map(|(label, _)| *label);
    let first = matches.next()?;

    let others: Vec<T> = matches.collect();
    if !others.is_empty() {
        trace!(chosen = ?first, ignored = ?others, "multiple labels matched; keeping first");
    }

    Some(first)
}
