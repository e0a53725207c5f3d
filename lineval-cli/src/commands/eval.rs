//! Eval command implementation

use super::init_logging;
use crate::config::{confusion_limit, CliConfig};
use crate::input::{load_lines, pair_files, resolve_patterns, MissingPrediction};
use crate::output::{create_formatter, open_sink, OutputFormat};
use crate::progress::ProgressReporter;
use anyhow::{Context, Result};
use clap::Args;
use lineval_core::{ConfusionReport, Evaluator};
use std::path::PathBuf;

/// Arguments for the eval command
#[derive(Debug, Args)]
pub struct EvalArgs {
    /// Ground-truth files or patterns (supports glob)
    #[arg(long, value_name = "FILE/PATTERN", num_args = 1.., required = true)]
    pub gt: Vec<String>,

    /// Prediction files or patterns, paired with the ground truth in sorted order
    #[arg(long, value_name = "FILE/PATTERN", num_args = 1..)]
    pub pred: Option<Vec<String>>,

    /// Extension of prediction files next to the ground truth [default: .pred.txt]
    #[arg(long, value_name = "EXT")]
    pub pred_ext: Option<String>,

    /// Number of most common confusions to show, -1 for all [default: 10]
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub n_confusions: Option<i64>,

    /// Number of worker threads (0 = one per CPU) [default: 1]
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// How to handle missing prediction files [default: error]
    #[arg(long, value_enum)]
    pub missing_prediction: Option<MissingPrediction>,

    /// Exclude lines with empty ground truth from the totals
    #[arg(long)]
    pub skip_empty_gt: bool,

    /// Reject lines longer than this many characters
    #[arg(long, value_name = "N")]
    pub max_line_chars: Option<usize>,

    /// Leave per-line records out of the result
    #[arg(long)]
    pub no_lines: bool,

    /// Output format [default: text]
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Output file (default: stdout)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl EvalArgs {
    /// Execute the eval command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let config = self.apply_overrides(CliConfig::load_or_default(self.config.as_deref())?);

        let gt_files = resolve_patterns(&self.gt)?;
        let pred_files = self.pred.as_deref().map(resolve_patterns).transpose()?;
        let mode = config.input.missing_prediction;
        let pairs = pair_files(gt_files, pred_files, &config.input.pred_ext, mode)?;
        log::info!("Evaluating {} file pair(s)", pairs.len());

        let (gt_paths, pred_paths): (Vec<_>, Vec<_>) = pairs
            .into_iter()
            .map(|pair| (pair.ground_truth, pair.prediction))
            .unzip();
        let ground_truth = load_lines(&gt_paths, mode)?;
        let predictions = load_lines(&pred_paths, mode)?;

        let evaluator = Evaluator::new(config.evaluation.clone())?;
        let progress = ProgressReporter::new(ground_truth.len() as u64, self.quiet);
        let result = evaluator
            .evaluate_with(&ground_truth, &predictions, &progress)
            .context("Evaluation failed")?;

        let report = ConfusionReport::build(&result, confusion_limit(config.output.n_confusions));
        let sink = open_sink(self.output.as_deref())?;
        let mut formatter = create_formatter(config.output.default_format, sink, config.output.pretty_json);
        formatter.write_evaluation(&result, &report)?;
        formatter.finish()
    }

    /// Command-line flags take precedence over configuration file values
    pub fn apply_overrides(&self, mut config: CliConfig) -> CliConfig {
        if let Some(pred_ext) = &self.pred_ext {
            config.input.pred_ext = pred_ext.clone();
        }
        if let Some(mode) = self.missing_prediction {
            config.input.missing_prediction = mode;
        }
        if let Some(n) = self.n_confusions {
            config.output.n_confusions = n;
        }
        if let Some(format) = self.format {
            config.output.default_format = format;
        }
        if let Some(threads) = self.threads {
            config.evaluation.worker_count = threads;
        }
        if self.skip_empty_gt {
            config.evaluation.skip_empty_gt = true;
        }
        if self.max_line_chars.is_some() {
            config.evaluation.max_line_chars = self.max_line_chars;
        }
        if self.no_lines {
            config.evaluation.retain_lines = false;
        }
        config
    }
}
