//! Configuration structures for the rulebook pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Main configuration for the scentrules pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RulebookConfig {
    /// Document segmentation configuration.
    pub segmentation: SegmentationConfig,

    /// Measurement extraction configuration.
    pub extraction: ExtractionConfig,

    /// Output configuration.
    pub output: OutputConfig,
}

/// Chapter, section and class-block segmentation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Word that opens a chapter header ("Chapter 3").
    pub chapter_token: String,

    /// Minimum trimmed content length for a section to become a rule.
    pub min_content_chars: usize,

    /// Minimum length of a captured class-requirement block.
    pub min_class_block_chars: usize,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            chapter_token: "Chapter".to_string(),
            min_content_chars: 10,
            min_class_block_chars: 50,
        }
    }
}

/// Measurement extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Infer `hides_known` from surrounding wording when no table flag was captured.
    pub infer_hides_known: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            infer_hides_known: true,
        }
    }
}

/// Output configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Pretty-print the JSON rule list.
    pub pretty: bool,

    /// Default authoritative override file, used when none is given on the command line.
    pub overrides_path: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: true,
            overrides_path: None,
        }
    }
}

impl RulebookConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: RulebookConfig =
            serde_json::from_str(r#"{ "segmentation": { "chapter_token": "CHAPTER" } }"#).unwrap();

        assert_eq!(config.segmentation.chapter_token, "CHAPTER");
        assert_eq!(config.segmentation.min_content_chars, 10);
        assert_eq!(config.segmentation.min_class_block_chars, 50);
        assert!(config.extraction.infer_hides_known);
        assert!(config.output.pretty);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = RulebookConfig::default();
        config.output.pretty = false;
        config.save(&path).unwrap();

        let loaded = RulebookConfig::from_file(&path).unwrap();
        assert!(!loaded.output.pretty);
    }
}
