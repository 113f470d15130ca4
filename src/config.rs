use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, Result};

/// Directory layout for the corpus-level batch stages.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    pub raw_dir: String,
    pub cleaned_dir: String,
    pub refined_dir: String,
    pub atomic_dir: String,
    pub export_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            raw_dir: "raw_txt".to_string(),
            cleaned_dir: "cleaned_jsonl".to_string(),
            refined_dir: "refined_jsonl".to_string(),
            atomic_dir: "atomic_jsonl".to_string(),
            export_file: "combined_esg_final.csv".to_string(),
        }
    }
}

impl Config {
    /// Loads the TOML config at `path`, falling back to defaults when the file
    /// does not exist.
    pub fn load(path: &str) -> Result<Self> {
        if !Path::new(path).exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            PipelineError::Config(format!("Failed to read config file '{path}': {e}"))
        })?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }
}

/// Option differences between the corpus batch pipeline and the
/// single-document inference pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    /// Accept a bare `N years` expression as a metric unit (batch cleaning only).
    pub include_years_as_metric_unit: bool,
    /// Drop glossary/boilerplate sentences before classification.
    pub glossary_filter_enabled: bool,
}

impl PipelineOptions {
    /// Options for the corpus-level cleaning stage.
    pub fn batch() -> Self {
        Self {
            include_years_as_metric_unit: true,
            glossary_filter_enabled: true,
        }
    }

    /// Options for the single-document inference path.
    pub fn inference() -> Self {
        Self {
            include_years_as_metric_unit: false,
            glossary_filter_enabled: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_falls_back_to_defaults_when_file_missing() {
        let config = Config::load("definitely_not_a_config.toml").unwrap();
        assert_eq!(config.raw_dir, "raw_txt");
        assert_eq!(config.atomic_dir, "atomic_jsonl");
    }

    #[test]
    fn test_variant_flags() {
        assert!(PipelineOptions::batch().include_years_as_metric_unit);
        assert!(PipelineOptions::batch().glossary_filter_enabled);
        assert!(!PipelineOptions::inference().include_years_as_metric_unit);
        assert!(!PipelineOptions::inference().glossary_filter_enabled);
    }
}
