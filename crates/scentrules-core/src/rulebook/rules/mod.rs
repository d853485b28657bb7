//! Rule-based measurement extractors for rulebook text.

pub mod area;
pub mod arrangement;
pub mod calls;
pub mod dimensions;
pub mod distractions;
pub mod equipment;
pub mod hides;
pub mod odors;
pub mod patterns;
pub mod time;

pub use area::{AreaExtractor, AreaRange};
pub use arrangement::{ArrangementExtractor, ContainerArrangement};
pub use calls::{RequiredCallExtractor, RequiredCalls};
pub use dimensions::{HeightExtractor, HeightRange, Spacing, SpacingExtractor};
pub use distractions::{DistractionExtractor, Distractions};
pub use equipment::{
    ContainerCount, ContainerCountExtractor, ContainerType, ContainerTypeExtractor, LeashExtractor,
    LeashLength,
};
pub use hides::{HideCount, HideCountExtractor};
pub use odors::{OdorExtractor, TargetOdors};
pub use time::{TimeLimit, TimeLimitExtractor, Warning, WarningExtractor};

use tracing::trace;

use crate::error::Result;
use crate::models::config::ExtractionConfig;
use crate::models::rule::{Level, Measurements};

/// Text handed to every extractor, together with the block's classified level.
#[derive(Debug, Clone, Copy)]
pub struct BlockText<'a> {
    pub text: &'a str,
    pub level: Option<Level>,
}

impl<'a> BlockText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self { text, level: None }
    }

    pub fn with_level(mut self, level: Option<Level>) -> Self {
        self.level = level;
        self
    }
}

/// Typed extractor output that knows which measurement keys it fills.
pub trait IntoMeasurements {
    fn write_to(self, measurements: &mut Measurements);
}

/// Trait for field extractors.
pub trait FieldExtractor {
    /// Label used in logs.
    const NAME: &'static str;

    /// The type of value this extractor produces.
    type Output: IntoMeasurements;

    /// Extract the field from a block, or `None` when the text says nothing about it.
    fn extract(&self, block: &BlockText<'_>) -> Option<Self::Output>;
}

/// Object-safe view of a [`FieldExtractor`], so extractors can share one ordered list.
pub trait MeasurementRule {
    fn name(&self) -> &'static str;

    /// Write this rule's keys into `measurements`. Returns whether anything was written.
    fn apply(&self, block: &BlockText<'_>, measurements: &mut Measurements) -> bool;
}

impl<E: FieldExtractor> MeasurementRule for E {
    fn name(&self) -> &'static str {
        E::NAME
    }

    fn apply(&self, block: &BlockText<'_>, measurements: &mut Measurements) -> bool {
        match self.extract(block) {
            Some(output) => {
                output.write_to(measurements);
                true
            }
            None => false,
        }
    }
}

/// The fixed, ordered list of measurement extractors.
///
/// Built once per run; every block is passed through the same list in the
/// same order, so output is deterministic.
pub struct MeasurementCascade {
    rules: Vec<Box<dyn MeasurementRule>>,
}

impl MeasurementCascade {
    /// Compile every extractor.
    pub fn new(config: &ExtractionConfig) -> Result<Self> {
        let rules: Vec<Box<dyn MeasurementRule>> = vec![
            Box::new(AreaExtractor::new()?),
            Box::new(TimeLimitExtractor::new()?),
            Box::new(WarningExtractor::new()?),
            Box::new(HideCountExtractor::new()?.with_knowledge_inference(config.infer_hides_known)),
            Box::new(HeightExtractor::new()?),
            Box::new(SpacingExtractor::new()?),
            Box::new(LeashExtractor::new()?),
            Box::new(ContainerCountExtractor::new()?),
            Box::new(OdorExtractor::new()?),
            Box::new(DistractionExtractor::new()?),
            Box::new(RequiredCallExtractor::new()?),
            Box::new(ArrangementExtractor::new()?),
            Box::new(ContainerTypeExtractor::new()?),
        ];

        Ok(Self { rules })
    }

    /// Names of the extractors, in application order.
    pub fn names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    /// Run every extractor over the block. An empty result is valid.
    pub fn extract(&self, block: &BlockText<'_>) -> Measurements {
        let mut measurements = Measurements::new();

        for rule in &self.rules {
            if rule.apply(block, &mut measurements) {
                trace!(extractor = rule.name(), "measurement extracted");
            }
        }

        measurements
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn cascade() -> MeasurementCascade {
        MeasurementCascade::new(&ExtractionConfig::default()).unwrap()
    }

    #[test]
    fn test_cascade_order() {
        assert_eq!(
            cascade().names(),
            vec![
                "area",
                "time_limit",
                "warning",
                "hide_count",
                "height",
                "spacing",
                "leash",
                "container_count",
                "target_odors",
                "distractions",
                "required_calls",
                "container_arrangement",
                "container_type",
            ]
        );
    }

    #[test]
    fn test_empty_block_yields_empty_measurements() {
        let m = cascade().extract(&BlockText::new("Exhibitors must be courteous to stewards."));
        assert!(m.is_empty());
    }

    #[test]
    fn test_class_block_extraction() {
        let text = "Container Novice Class : Search area: 15 identical cardboard box containers \
                    arranged in 3 rows of 5. Time: 2 minutes with a 30 second warning. \
                    Hides: 1 (Known). Odor: Birch. Distractions: 1 non-food distraction. \
                    The handler must call Alert and must call Finish.";
        let block = BlockText::new(text).with_level(Some(Level::Novice));
        let m = cascade().extract(&block);

        assert_eq!(m.get("num_containers"), Some(&json!(15)));
        assert_eq!(m.get("container_arrangement"), Some(&json!("3 rows of 5")));
        assert_eq!(m.get("container_type"), Some(&json!("identical cardboard boxes")));
        assert_eq!(m.get("time_limit_minutes"), Some(&json!(2)));
        assert_eq!(m.get("warning_seconds"), Some(&json!(30)));
        assert_eq!(m.get("min_hides"), Some(&json!(1)));
        assert_eq!(m.get("max_hides"), Some(&json!(1)));
        assert_eq!(m.get("hides_known"), Some(&json!(true)));
        assert_eq!(m.get("target_odors"), Some(&json!(["Birch"])));
        assert_eq!(m.get("num_distractions"), Some(&json!(1)));
        assert_eq!(m.get("distraction_types"), Some(&json!(["non-food"])));
        assert_eq!(m.get("required_calls"), Some(&json!(["Alert", "Finish"])));
    }
}
