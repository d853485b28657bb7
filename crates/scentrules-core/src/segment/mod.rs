//! Document segmentation: chapters, sections and class-requirement blocks.

mod locator;
mod segmenter;

pub use locator::{ClassBlock, ClassRequirementLocator};
pub use segmenter::Segmenter;

/// A chapter span with running page headers removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    /// Chapter number, or `None` for a document without chapter headers.
    pub number: Option<u32>,
    pub title: String,
    /// Chapter text after the header line.
    pub body: String,
}

impl Chapter {
    /// Prefix used in rule section identifiers.
    pub fn label(&self) -> Option<String> {
        self.number.map(|n| format!("Chapter {n}"))
    }
}

/// A "Section <n>. <title>" span within a chapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub number: u32,
    pub title: String,
    /// Text following the "Section <n>." marker, trimmed.
    pub content: String,
}

/// Accepted segments plus the number of candidates discarded as mis-segmentations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segments<T> {
    pub items: Vec<T>,
    pub skipped: usize,
}

impl<T> Default for Segments<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            skipped: 0,
        }
    }
}
