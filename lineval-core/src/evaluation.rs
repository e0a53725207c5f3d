//! Evaluation of a single ground-truth / prediction pair

use crate::alignment::align;
use crate::confusion::ConfusionTable;
use crate::error::{LineError, Side};

#[cfg(feature = "serde")]
use serde::Serialize;

/// A ground-truth transcription and the matching prediction
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LinePair {
    /// Reference text
    pub ground_truth: String,
    /// Recognised text
    pub prediction: String,
}

impl LinePair {
    /// Create a pair from any string-like values
    pub fn new(ground_truth: impl Into<String>, prediction: impl Into<String>) -> Self {
        Self {
            ground_truth: ground_truth.into(),
            prediction: prediction.into(),
        }
    }
}

impl<G: Into<String>, P: Into<String>> From<(G, P)> for LinePair {
    fn from((ground_truth, prediction): (G, P)) -> Self {
        Self::new(ground_truth, prediction)
    }
}

/// Statistics for one evaluated line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct LineEvaluation {
    /// Ground-truth length in characters
    pub char_count: usize,
    /// Edit distance between ground truth and prediction
    pub char_errors: usize,
    /// Sum of the error weights of all mismatched synchronization blocks
    pub sync_errors: usize,
    /// Mismatched fragment pairs seen on this line
    pub confusion: ConfusionTable,
    /// The evaluated pair
    pub pair: LinePair,
}

impl LineEvaluation {
    /// Record for a line excluded from scoring
    pub fn skipped(pair: LinePair) -> Self {
        Self {
            pair,
            ..Default::default()
        }
    }

    /// Character error rate of this line, if it has ground-truth characters
    pub fn error_rate(&self) -> Option<f64> {
        (self.char_count > 0).then(|| self.char_errors as f64 / self.char_count as f64)
    }
}

/// Evaluate one pair
///
/// Lines with empty ground truth yield a zero record without alignment when
/// `skip_empty_gt` is set.
pub fn evaluate_pair(ground_truth: &str, prediction: &str, skip_empty_gt: bool) -> LineEvaluation {
    let pair = LinePair::new(ground_truth, prediction);
    if ground_truth.is_empty() && skip_empty_gt {
        return LineEvaluation::skipped(pair);
    }

    let gt_chars: Vec<char> = ground_truth.chars().collect();
    let pred_chars: Vec<char> = prediction.chars().collect();
    let alignment = align(&gt_chars, &pred_chars);

    let mut confusion = ConfusionTable::new();
    let mut sync_errors = 0;
    for block in alignment.mismatches() {
        confusion.record(block);
        sync_errors += block.error_weight();
    }

    LineEvaluation {
        char_count: gt_chars.len(),
        char_errors: alignment.distance(),
        sync_errors,
        confusion,
        pair,
    }
}

/// Pair evaluator carrying the per-line options of a corpus run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairEvaluator {
    skip_empty_gt: bool,
    max_line_chars: Option<usize>,
}

impl PairEvaluator {
    /// Create an evaluator
    pub fn new(skip_empty_gt: bool, max_line_chars: Option<usize>) -> Self {
        Self {
            skip_empty_gt,
            max_line_chars,
        }
    }

    /// Whether lines with empty ground truth are excluded
    pub fn skip_empty_gt(&self) -> bool {
        self.skip_empty_gt
    }

    /// Evaluate a pair after checking the line length limit
    pub fn evaluate(&self, ground_truth: &str, prediction: &str) -> Result<LineEvaluation, LineError> {
        if let Some(limit) = self.max_line_chars {
            check_length(Side::GroundTruth, ground_truth, limit)?;
            check_length(Side::Prediction, prediction, limit)?;
        }
        Ok(evaluate_pair(ground_truth, prediction, self.skip_empty_gt))
    }
}

fn check_length(side: Side, text: &str, limit: usize) -> Result<(), LineError> {
    let chars = text.chars().count();
    if chars > limit {
        return Err(LineError::LineTooLong { side, chars, limit });
    }
    Ok(())
}
