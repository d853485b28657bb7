//! Core library for scent work rulebook parsing.
//!
//! This crate provides:
//! - Chapter, section and class-requirement segmentation of rulebook text
//! - Level and element classification
//! - Rule-based measurement extraction (areas, times, hides, equipment)
//! - Keyword and category tagging
//! - Merging of verified authoritative measurements

pub mod classify;
pub mod error;
pub mod merge;
pub mod models;
pub mod rulebook;
pub mod segment;
pub mod tagger;

pub use classify::Classifier;
pub use error::{Result, RulebookError};
pub use merge::{apply_overrides, AuthoritativeMeasurements};
pub use models::config::RulebookConfig;
pub use models::rule::{Category, Element, Level, Measurements, MeasurementsSource, Rule};
pub use rulebook::{ParseOutcome, RulebookParser};
pub use segment::{ClassRequirementLocator, Segmenter};
pub use tagger::Tagger;
