//! Parallel evaluation of line pairs
//!
//! Every pair is evaluated independently on a rayon pool. Results are
//! collected by pair index and folded by a single thread afterwards, so the
//! aggregate does not depend on the number of workers or on the order in
//! which workers finish.

use crate::aggregate::{aggregate, CorpusAggregate};
use crate::config::EvaluatorConfig;
use crate::error::{EvalError, LineError, Result};
use crate::evaluation::{LineEvaluation, LinePair, PairEvaluator};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
#[cfg(feature = "parallel")]
use std::sync::Arc;

/// Receives progress notifications during a corpus run
///
/// Calls may arrive from several worker threads and in any order.
pub trait EvaluationObserver: Send + Sync {
    /// A pair finished evaluating, successfully or not
    fn on_line_evaluated(&self, _index: usize) {}

    /// All pairs were evaluated
    fn on_finished(&self, _total: usize) {}
}

/// Observer that ignores all notifications
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl EvaluationObserver for NoopObserver {}

/// Evaluates corpora of line pairs on a fixed-size worker pool
#[derive(Debug)]
pub struct ParallelEvaluator {
    config: EvaluatorConfig,
    workers: usize,
    #[cfg(feature = "parallel")]
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl ParallelEvaluator {
    /// Create an evaluator, building its worker pool when more than one
    /// worker is configured
    pub fn new(config: EvaluatorConfig) -> Result<Self> {
        config.validate()?;
        let workers = config.effective_workers();

        #[cfg(feature = "parallel")]
        let pool = if workers > 1 {
            let prefix = config.thread_name_prefix.clone();
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(workers)
                .thread_name(move |i| format!("{prefix}-{i}"))
                .build()
                .map_err(|source| EvalError::ThreadPool { source })?;
            Some(Arc::new(pool))
        } else {
            None
        };

        #[cfg(not(feature = "parallel"))]
        {
            if workers > 1 {
                log::warn!("built without the `parallel` feature; running {workers} workers sequentially");
            }
        }

        Ok(Self {
            config,
            workers,
            #[cfg(feature = "parallel")]
            pool,
        })
    }

    /// The configuration this evaluator was built with
    pub fn config(&self) -> &EvaluatorConfig {
        &self.config
    }

    /// Number of workers in use
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Evaluate parallel slices of ground truths and predictions
    pub fn evaluate_corpus<G, P>(&self, ground_truths: &[G], predictions: &[P]) -> Result<CorpusAggregate>
    where
        G: AsRef<str> + Sync,
        P: AsRef<str> + Sync,
    {
        self.evaluate_corpus_with(ground_truths, predictions, &NoopObserver)
    }

    /// Evaluate parallel slices, reporting progress to `observer`
    pub fn evaluate_corpus_with<G, P>(
        &self,
        ground_truths: &[G],
        predictions: &[P],
        observer: &dyn EvaluationObserver,
    ) -> Result<CorpusAggregate>
    where
        G: AsRef<str> + Sync,
        P: AsRef<str> + Sync,
    {
        let lines = self.evaluate_lines(ground_truths, predictions, observer)?;
        aggregate(lines, self.config.retain_lines)
    }

    /// Evaluate a slice of line pairs
    pub fn evaluate_pairs(&self, pairs: &[LinePair]) -> Result<CorpusAggregate> {
        let lines = self.run(
            pairs.len(),
            move |i| (pairs[i].ground_truth.as_str(), pairs[i].prediction.as_str()),
            &NoopObserver,
        )?;
        aggregate(lines, self.config.retain_lines)
    }

    /// Per-line records in input order, without aggregation
    pub fn evaluate_lines<G, P>(
        &self,
        ground_truths: &[G],
        predictions: &[P],
        observer: &dyn EvaluationObserver,
    ) -> Result<Vec<LineEvaluation>>
    where
        G: AsRef<str> + Sync,
        P: AsRef<str> + Sync,
    {
        if ground_truths.len() != predictions.len() {
            return Err(EvalError::CountMismatch {
                ground_truths: ground_truths.len(),
                predictions: predictions.len(),
            });
        }

        self.run(
            ground_truths.len(),
            move |i| (ground_truths[i].as_ref(), predictions[i].as_ref()),
            observer,
        )
    }

    fn run<'a, F>(&self, len: usize, pair_at: F, observer: &dyn EvaluationObserver) -> Result<Vec<LineEvaluation>>
    where
        F: Fn(usize) -> (&'a str, &'a str) + Sync,
    {
        let evaluator = self.config.pair_evaluator();
        log::debug!("evaluating {len} pair(s) with {} worker(s)", self.workers);
        if self.workers > len && len > 0 {
            log::warn!("more workers ({}) than pairs ({len})", self.workers);
        }

        let outcomes = self.dispatch(len, &pair_at, &evaluator, observer);
        observer.on_finished(len);

        let mut lines = Vec::with_capacity(len);
        for (index, outcome) in outcomes.into_iter().enumerate() {
            match outcome {
                Ok(line) => lines.push(line),
                Err(source) => {
                    let (gt, pred) = pair_at(index);
                    log::debug!("pair #{index} failed: {source}");
                    return Err(EvalError::worker_failure(index, gt, pred, source));
                }
            }
        }
        Ok(lines)
    }

    #[cfg(feature = "parallel")]
    fn dispatch<'a, F>(
        &self,
        len: usize,
        pair_at: &F,
        evaluator: &PairEvaluator,
        observer: &dyn EvaluationObserver,
    ) -> Vec<std::result::Result<LineEvaluation, LineError>>
    where
        F: Fn(usize) -> (&'a str, &'a str) + Sync,
    {
        match &self.pool {
            Some(pool) => pool.install(|| {
                (0..len)
                    .into_par_iter()
                    .map(|i| evaluate_one(i, pair_at, evaluator, observer))
                    .collect()
            }),
            None => sequential(len, pair_at, evaluator, observer),
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn dispatch<'a, F>(
        &self,
        len: usize,
        pair_at: &F,
        evaluator: &PairEvaluator,
        observer: &dyn EvaluationObserver,
    ) -> Vec<std::result::Result<LineEvaluation, LineError>>
    where
        F: Fn(usize) -> (&'a str, &'a str) + Sync,
    {
        sequential(len, pair_at, evaluator, observer)
    }
}

fn evaluate_one<'a, F>(
    index: usize,
    pair_at: &F,
    evaluator: &PairEvaluator,
    observer: &dyn EvaluationObserver,
) -> std::result::Result<LineEvaluation, LineError>
where
    F: Fn(usize) -> (&'a str, &'a str),
{
    let (gt, pred) = pair_at(index);
    let outcome = evaluator.evaluate(gt, pred);
    observer.on_line_evaluated(index);
    outcome
}

fn sequential<'a, F>(
    len: usize,
    pair_at: &F,
    evaluator: &PairEvaluator,
    observer: &dyn EvaluationObserver,
) -> Vec<std::result::Result<LineEvaluation, LineError>>
where
    F: Fn(usize) -> (&'a str, &'a str),
{
    let mut outcomes = Vec::with_capacity(len);
    for index in 0..len {
        let outcome = evaluate_one(index, pair_at, evaluator, observer);
        let failed = outcome.is_err();
        outcomes.push(outcome);
        if failed {
            break;
        }
    }
    outcomes
}

/// Evaluate a corpus in one call
///
/// Per-line records are retained in input order. `worker_count == 0` uses
/// one worker per logical CPU.
pub fn evaluate_corpus<G, P>(
    ground_truths: &[G],
    predictions: &[P],
    skip_empty_gt: bool,
    worker_count: usize,
) -> Result<CorpusAggregate>
where
    G: AsRef<str> + Sync,
    P: AsRef<str> + Sync,
{
    if ground_truths.len() != predictions.len() {
        return Err(EvalError::CountMismatch {
            ground_truths: ground_truths.len(),
            predictions: predictions.len(),
        });
    }

    let config = EvaluatorConfig::builder()
        .skip_empty_gt(skip_empty_gt)
        .worker_count(worker_count)
        .retain_lines(true)
        .build()?;
    ParallelEvaluator::new(config)?.evaluate_corpus(ground_truths, predictions)
}
