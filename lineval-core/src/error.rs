//! Error types for corpus evaluation
//!
//! Corpus-level failures are reported through [`EvalError`]. Failures that
//! belong to a single line pair are described by [`LineError`] and reach the
//! caller wrapped in [`EvalError::WorkerFailure`] together with the pair index.

use thiserror::Error;

/// Maximum number of characters of a line shown in error messages
const PREVIEW_CHARS: usize = 32;

/// Which side of a line pair an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    /// The ground-truth transcription
    GroundTruth,
    /// The predicted transcription
    Prediction,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::GroundTruth => write!(f, "ground truth"),
            Side::Prediction => write!(f, "prediction"),
        }
    }
}

/// Errors raised while evaluating a single line pair
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LineError {
    /// A line exceeds the configured length limit
    #[error("{side} has {chars} characters (limit: {limit})")]
    LineTooLong {
        /// Offending side of the pair
        side: Side,
        /// Length of the line in characters
        chars: usize,
        /// Configured maximum
        limit: usize,
    },
}

/// Errors raised by corpus evaluation
#[derive(Debug, Error)]
pub enum EvalError {
    /// Ground-truth and prediction collections differ in length
    #[error("mismatch in ground truth and prediction count: {ground_truths} vs {predictions}")]
    CountMismatch {
        /// Number of ground-truth lines
        ground_truths: usize,
        /// Number of predicted lines
        predictions: usize,
    },

    /// No ground-truth characters were seen, so no error rate exists
    #[error("cannot compute label error rate: corpus of {instances} line(s) has no ground-truth characters")]
    EmptyCorpus {
        /// Number of lines folded into the aggregate
        instances: usize,
    },

    /// Evaluation of one line pair failed
    #[error("evaluation failed for pair #{index} (gt: {ground_truth:?}, pred: {prediction:?})")]
    WorkerFailure {
        /// Index of the failing pair in input order
        index: usize,
        /// Truncated ground-truth preview
        ground_truth: String,
        /// Truncated prediction preview
        prediction: String,
        /// Underlying cause
        #[source]
        source: LineError,
    },

    /// Invalid configuration parameters
    #[error("invalid configuration: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected
        reason: String,
    },

    /// Prediction sets were evaluated before any ground truth was loaded
    #[error("no ground truth has been preloaded")]
    GroundTruthNotLoaded,

    /// The worker pool could not be created
    #[cfg(feature = "parallel")]
    #[error("failed to build worker pool")]
    ThreadPool {
        /// Error reported by rayon
        #[source]
        source: rayon::ThreadPoolBuildError,
    },
}

impl EvalError {
    /// Wrap a line failure with the pair it came from
    pub fn worker_failure(index: usize, ground_truth: &str, prediction: &str, source: LineError) -> Self {
        EvalError::WorkerFailure {
            index,
            ground_truth: preview(ground_truth),
            prediction: preview(prediction),
            source,
        }
    }
}

/// Result type for evaluation operations
pub type Result<T> = std::result::Result<T, EvalError>;

/// Shorten a line for diagnostics, cutting on character boundaries
pub fn preview(text: &str) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}…")
    } else {
        head
    }
}
