//! Class-requirement block location.

use regex::Regex;
use tracing::debug;

use super::{Chapter, Segments};
use crate::error::Result;
use crate::models::config::SegmentationConfig;
use crate::models::rule::{Element, Level};

/// Requirements block for one (element, level) class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassBlock {
    pub element: Element,
    pub level: Level,
    /// Text between this class header and the next boundary.
    pub content: String,
}

impl ClassBlock {
    pub fn title(&self) -> String {
        format!("{} {} Class", self.element, self.level)
    }
}

/// A class header occurrence: "<Element> <Level> Class :".
struct Header {
    start: usize,
    end: usize,
    element: Element,
    level: Level,
}

/// Carves "<Element> <Level> Class :" blocks out of a chapter.
///
/// All header positions are found in one scan. A header only opens a block
/// when it is set apart from the surrounding prose: at the start of the
/// chapter, after a line break, after two or more spaces, or directly after
/// another header. A block ends at the next such header, at a
/// "Section <n>." marker, or at the end of the chapter.
pub struct ClassRequirementLocator {
    header: Regex,
    section_marker: Regex,
    min_block_chars: usize,
}

impl ClassRequirementLocator {
    pub fn new(config: &SegmentationConfig) -> Result<Self> {
        let elements = Element::ALL.map(|e| e.name()).join("|");
        let levels = Level::ALL.map(|l| l.name()).join("|");

        Ok(Self {
            header: Regex::new(&format!(r"\b({elements})[ \t]+({levels})[ \t]+Class[ \t]*:"))?,
            section_marker: Regex::new(r"\bSection\s+\d+\.")?,
            min_block_chars: config.min_class_block_chars,
        })
    }

    fn headers(&self, body: &str) -> Vec<Header> {
        let mut accepted: Vec<Header> = Vec::new();

        for caps in self.header.captures_iter(body) {
            let (Some(whole), Some(element), Some(level)) = (
                caps.get(0),
                Element::from_name(&caps[1]),
                Level::from_name(&caps[2]),
            ) else {
                continue;
            };

            let previous_end = accepted.last().map(|h| h.end);
            if is_set_apart(&body[..whole.start()], previous_end) {
                accepted.push(Header {
                    start: whole.start(),
                    end: whole.end(),
                    element,
                    level,
                });
            }
        }

        accepted
    }

    /// Locate every class-requirement block in a chapter, in document order.
    pub fn locate(&self, chapter: &Chapter) -> Segments<ClassBlock> {
        let body = chapter.body.as_str();
        let headers = self.headers(body);
        let mut segments = Segments::default();

        if headers.is_empty() {
            return segments;
        }

        let mut boundaries: Vec<usize> = headers.iter().map(|h| h.start).collect();
        boundaries.extend(self.section_marker.find_iter(body).map(|m| m.start()));
        boundaries.sort_unstable();

        for header in &headers {
            let end = boundaries
                .iter()
                .copied()
                .find(|&b| b >= header.end)
                .unwrap_or(body.len());

            let content = body[header.end..end].trim();
            if content.chars().count() < self.min_block_chars {
                debug!(
                    element = %header.element,
                    level = %header.level,
                    chars = content.len(),
                    "skipping short class block"
                );
                segments.skipped += 1;
                continue;
            }

            segments.items.push(ClassBlock {
                element: header.element,
                level: header.level,
                content: content.to_string(),
            });
        }

        segments
    }
}

/// Whether a header preceded by `before` stands on its own rather than inside prose.
fn is_set_apart(before: &str, previous_header_end: Option<usize>) -> bool {
    let trimmed = before.trim_end();
    if trimmed.is_empty() {
        return true;
    }

    let gap = &before[trimmed.len()..];
    if gap.contains('\n') || gap.chars().count() >= 2 {
        return true;
    }

    previous_header_end == Some(trimmed.len())
}
