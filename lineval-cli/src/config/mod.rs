//! Configuration module

use crate::error::CliError;
use crate::input::MissingPrediction;
use crate::output::OutputFormat;
use anyhow::{Context, Result};
use lineval_core::EvaluatorConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// CLI configuration structure
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CliConfig {
    /// Evaluation configuration
    #[serde(default)]
    pub evaluation: EvaluatorConfig,

    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// Input configuration
    #[serde(default)]
    pub input: InputConfig,
}

impl CliConfig {
    /// Load a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: CliConfig = toml::from_str(&content)
            .map_err(|e| CliError::ConfigError(e.to_string()))
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config
            .evaluation
            .validate()
            .map_err(|e| CliError::ConfigError(e.to_string()))?;
        Ok(config)
    }

    /// Load `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Output-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Default output format
    pub default_format: OutputFormat,

    /// Confusions shown in reports (-1 = all)
    pub n_confusions: i64,

    /// Pretty print JSON output
    pub pretty_json: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_format: OutputFormat::Text,
            n_confusions: 10,
            pretty_json: true,
        }
    }
}

/// Input-related configuration
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct InputConfig {
    /// Extension replacing the ground-truth extension to find predictions
    pub pred_ext: String,

    /// Handling of missing prediction files
    pub missing_prediction: MissingPrediction,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            pred_ext: ".pred.txt".to_string(),
            missing_prediction: MissingPrediction::Error,
        }
    }
}

/// Convert a confusion count setting into a report limit
///
/// Negative values show every confusion.
pub fn confusion_limit(n_confusions: i64) -> Option<usize> {
    usize::try_from(n_confusions).ok()
}
