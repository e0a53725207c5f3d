//! Configuration for corpus evaluation

use crate::error::{EvalError, Result};
use crate::evaluation::PairEvaluator;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Options controlling a corpus evaluation run
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct EvaluatorConfig {
    /// Exclude lines with empty ground truth from all totals
    pub skip_empty_gt: bool,

    /// Number of concurrent workers (0 = one per logical CPU)
    pub worker_count: usize,

    /// Keep per-line records in the aggregate
    pub retain_lines: bool,

    /// Reject lines longer than this many characters
    pub max_line_chars: Option<usize>,

    /// Name prefix for worker threads
    pub thread_name_prefix: String,
}

impl Default for EvaluatorConfig {
    fn default() -> Self {
        Self {
            skip_empty_gt: false,
            worker_count: 1,
            retain_lines: true,
            max_line_chars: None,
            thread_name_prefix: "lineval-worker".to_string(),
        }
    }
}

impl EvaluatorConfig {
    /// Creates a new builder for EvaluatorConfig
    pub fn builder() -> EvaluatorConfigBuilder {
        EvaluatorConfigBuilder::new()
    }

    /// Sequential configuration with default options
    pub fn sequential() -> Self {
        Self::default()
    }

    /// Configuration using every available CPU
    pub fn all_cores() -> Self {
        Self {
            worker_count: 0,
            ..Default::default()
        }
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.max_line_chars == Some(0) {
            return Err(EvalError::InvalidConfig {
                reason: "max_line_chars must be greater than 0".to_string(),
            });
        }

        if self.thread_name_prefix.trim().is_empty() {
            return Err(EvalError::InvalidConfig {
                reason: "thread_name_prefix cannot be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Worker count with the automatic setting resolved
    pub fn effective_workers(&self) -> usize {
        match self.worker_count {
            0 => available_cores(),
            n => n,
        }
    }

    /// The per-line evaluator described by this configuration
    pub fn pair_evaluator(&self) -> PairEvaluator {
        PairEvaluator::new(self.skip_empty_gt, self.max_line_chars)
    }
}

#[cfg(feature = "parallel")]
fn available_cores() -> usize {
    num_cpus::get().max(1)
}

#[cfg(not(feature = "parallel"))]
fn available_cores() -> usize {
    1
}

/// Builder for EvaluatorConfig
#[derive(Debug, Default)]
pub struct EvaluatorConfigBuilder {
    config: EvaluatorConfig,
}

impl EvaluatorConfigBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Exclude lines with empty ground truth
    pub fn skip_empty_gt(mut self, skip: bool) -> Self {
        self.config.skip_empty_gt = skip;
        self
    }

    /// Set the number of workers (0 = automatic)
    pub fn worker_count(mut self, count: usize) -> Self {
        self.config.worker_count = count;
        self
    }

    /// Keep or drop per-line records
    pub fn retain_lines(mut self, retain: bool) -> Self {
        self.config.retain_lines = retain;
        self
    }

    /// Limit the accepted line length
    pub fn max_line_chars(mut self, limit: Option<usize>) -> Self {
        self.config.max_line_chars = limit;
        self
    }

    /// Set the worker thread name prefix
    pub fn thread_name_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.config.thread_name_prefix = prefix.into();
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<EvaluatorConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EvaluatorConfig::default();
        assert!(!config.skip_empty_gt);
        assert_eq!(config.worker_count, 1);
        assert!(config.retain_lines);
        assert_eq!(config.max_line_chars, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = EvaluatorConfig::builder()
            .skip_empty_gt(true)
            .worker_count(4)
            .retain_lines(false)
            .max_line_chars(Some(512))
            .thread_name_prefix("eval")
            .build()
            .unwrap();

        assert!(config.skip_empty_gt);
        assert_eq!(config.effective_workers(), 4);
        assert!(!config.retain_lines);
        assert_eq!(config.max_line_chars, Some(512));
        assert_eq!(config.thread_name_prefix, "eval");
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_limit = EvaluatorConfig::builder().max_line_chars(Some(0)).build();
        assert!(matches!(zero_limit, Err(EvalError::InvalidConfig { .. })));

        let blank_prefix = EvaluatorConfig::builder().thread_name_prefix("  ").build();
        assert!(matches!(blank_prefix, Err(EvalError::InvalidConfig { .. })));
    }

    #[test]
    fn test_auto_workers_resolve_to_at_least_one() {
        assert!(EvaluatorConfig::all_cores().effective_workers() >= 1);
    }
}
