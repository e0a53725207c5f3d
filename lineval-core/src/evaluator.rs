//! Evaluation against a reusable ground-truth corpus
//!
//! When several prediction sets (different models, or different voting
//! strategies over the same models) are compared, the ground truth only
//! needs to be loaded once. [`Evaluator`] keeps it and evaluates any number
//! of prediction sets against it.

use crate::aggregate::CorpusAggregate;
use crate::config::EvaluatorConfig;
use crate::error::{EvalError, Result};
use crate::parallel::{EvaluationObserver, NoopObserver, ParallelEvaluator};
use std::collections::BTreeMap;

/// Corpus evaluator with optional preloaded ground truth
#[derive(Debug)]
pub struct Evaluator {
    engine: ParallelEvaluator,
    ground_truth: Option<Vec<String>>,
}

impl Evaluator {
    /// Create an evaluator with the given configuration
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        Ok(Self {
            engine: ParallelEvaluator::new(config)?,
            ground_truth: None,
        })
    }

    /// The active configuration
    pub fn config(&self) -> &EvaluatorConfig {
        self.engine.config()
    }

    /// Keep ground-truth lines for later prediction sets
    pub fn preload_ground_truth<I, S>(&mut self, lines: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        log::debug!("preloaded {} ground-truth line(s)", lines.len());
        self.ground_truth = Some(lines);
    }

    /// The preloaded ground truth, if any
    pub fn ground_truth(&self) -> Option<&[String]> {
        self.ground_truth.as_deref()
    }

    /// Evaluate predictions against explicitly given ground truth
    pub fn evaluate<G, P>(&self, ground_truth: &[G], predictions: &[P]) -> Result<CorpusAggregate>
    where
        G: AsRef<str> + Sync,
        P: AsRef<str> + Sync,
    {
        self.evaluate_with(ground_truth, predictions, &NoopObserver)
    }

    /// Evaluate predictions, reporting progress to `observer`
    pub fn evaluate_with<G, P>(
        &self,
        ground_truth: &[G],
        predictions: &[P],
        observer: &dyn EvaluationObserver,
    ) -> Result<CorpusAggregate>
    where
        G: AsRef<str> + Sync,
        P: AsRef<str> + Sync,
    {
        let result = self
            .engine
            .evaluate_corpus_with(ground_truth, predictions, observer)?;
        log::info!(
            "label error rate {:.4} over {} line(s) ({} errors, {} chars, {} sync errors)",
            result.avg_label_error_rate,
            result.total_instances,
            result.total_char_errors,
            result.total_chars,
            result.total_sync_errors
        );
        Ok(result)
    }

    /// Evaluate predictions against the preloaded ground truth
    pub fn evaluate_against_preloaded<P>(&self, predictions: &[P]) -> Result<CorpusAggregate>
    where
        P: AsRef<str> + Sync,
    {
        let ground_truth = self.ground_truth.as_deref().ok_or(EvalError::GroundTruthNotLoaded)?;
        self.evaluate(ground_truth, predictions)
    }

    /// Evaluate several named prediction sets against the preloaded ground truth
    ///
    /// Stops at the first failing set.
    pub fn evaluate_sets<I, N, P>(&self, sets: I) -> Result<BTreeMap<String, CorpusAggregate>>
    where
        I: IntoIterator<Item = (N, Vec<P>)>,
        N: Into<String>,
        P: AsRef<str> + Sync,
    {
        let ground_truth = self.ground_truth.as_deref().ok_or(EvalError::GroundTruthNotLoaded)?;

        let mut results = BTreeMap::new();
        for (name, predictions) in sets {
            let name = name.into();
            log::debug!("evaluating prediction set '{name}'");
            let result = self.evaluate(ground_truth, &predictions)?;
            results.insert(name, result);
        }
        Ok(results)
    }
}
