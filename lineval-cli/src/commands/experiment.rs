//! Experiment command implementation

use super::init_logging;
use crate::config::CliConfig;
use crate::error::CliError;
use crate::input::{load_lines, prediction_path, resolve_patterns, MissingPrediction};
use crate::output::percent;
use anyhow::{Context, Result};
use clap::Args;
use lineval_core::{CorpusAggregate, Evaluator};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Arguments for the experiment command
#[derive(Debug, Args)]
pub struct ExperimentArgs {
    /// Ground-truth files or patterns (supports glob)
    #[arg(long, value_name = "FILE/PATTERN", num_args = 1.., required = true)]
    pub gt: Vec<String>,

    /// One prediction extension per compared set
    #[arg(long, value_name = "EXT", num_args = 1.., required = true)]
    pub pred_ext: Vec<String>,

    /// Write all results as JSON to this file
    #[arg(long, value_name = "FILE")]
    pub dump: Option<PathBuf>,

    /// Number of worker threads (0 = one per CPU) [default: 1]
    #[arg(short = 'j', long, value_name = "N")]
    pub threads: Option<usize>,

    /// How to handle missing prediction files (error or empty) [default: error]
    #[arg(long, value_enum)]
    pub missing_prediction: Option<MissingPrediction>,

    /// Exclude lines with empty ground truth from the totals
    #[arg(long)]
    pub skip_empty_gt: bool,

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

impl ExperimentArgs {
    /// Execute the experiment command
    pub fn execute(&self) -> Result<()> {
        init_logging(self.verbose, self.quiet);
        log::debug!("Arguments: {:?}", self);

        let mut config = CliConfig::load_or_default(self.config.as_deref())?;
        if let Some(threads) = self.threads {
            config.evaluation.worker_count = threads;
        }
        if self.skip_empty_gt {
            config.evaluation.skip_empty_gt = true;
        }
        let mode = self.missing_prediction.unwrap_or(config.input.missing_prediction);
        if mode == MissingPrediction::Skip {
            return Err(CliError::ConfigError(
                "missing predictions cannot be skipped when sets share one ground truth".to_string(),
            )
            .into());
        }

        let gt_files = resolve_patterns(&self.gt)?;
        if !self.quiet {
            println!("Found {} files in the dataset", gt_files.len());
        }

        let mut evaluator = Evaluator::new(config.evaluation.clone())?;
        evaluator.preload_ground_truth(load_lines(&gt_files, MissingPrediction::Error)?);

        let mut sets = Vec::with_capacity(self.pred_ext.len());
        for ext in &self.pred_ext {
            sets.push((ext.clone(), self.load_set(&gt_files, ext, mode)?));
        }

        let results = evaluator.evaluate_sets(sets).context("Evaluation failed")?;

        write_summary(&mut io::stdout().lock(), &results)?;

        if let Some(path) = &self.dump {
            dump_results(path, &results)?;
            log::info!("Wrote results to {}", path.display());
        }

        Ok(())
    }

    fn load_set(&self, gt_files: &[PathBuf], ext: &str, mode: MissingPrediction) -> Result<Vec<String>> {
        let paths: Vec<PathBuf> = gt_files.iter().map(|gt| prediction_path(gt, ext)).collect();
        if mode == MissingPrediction::Error {
            if let Some(missing) = paths.iter().find(|p| !p.is_file()) {
                return Err(CliError::FileNotFound(missing.display().to_string()).into());
            }
        }
        load_lines(&paths, mode)
    }
}

/// One summary row per prediction set
pub fn write_summary<W: Write>(writer: &mut W, results: &BTreeMap<String, CorpusAggregate>) -> Result<()> {
    let width = results.keys().map(|k| k.chars().count()).max().unwrap_or(0).max(3);

    writeln!(
        writer,
        "{:<width$} {:>10} {:>8} {:>8} {:>8}",
        "SET", "LER", "ERRS", "CHARS", "SYNC"
    )?;
    for (name, result) in results {
        writeln!(
            writer,
            "{:<width$} {:>10} {:>8} {:>8} {:>8}",
            name,
            percent(result.avg_label_error_rate),
            result.total_char_errors,
            result.total_chars,
            result.total_sync_errors
        )?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the full result map as pretty JSON
pub fn dump_results(path: &Path, results: &BTreeMap<String, CorpusAggregate>) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, results)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
