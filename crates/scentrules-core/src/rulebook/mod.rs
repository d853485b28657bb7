//! Rulebook parsing: the segmentation-to-tagging pipeline and its extractors.

mod parser;
pub mod rules;

pub use parser::{ParseOutcome, RulebookParser};
