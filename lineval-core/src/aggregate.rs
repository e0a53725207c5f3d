//! Reduction of per-line statistics into corpus totals

use crate::confusion::ConfusionTable;
use crate::error::{EvalError, Result};
use crate::evaluation::LineEvaluation;
use crate::monoid::Monoid;

#[cfg(feature = "serde")]
use serde::Serialize;

/// Additive corpus counters
///
/// This is the mergeable part of a [`CorpusAggregate`]; the error rate is
/// only derived once all partial totals have been combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorpusTotals {
    /// Number of lines folded in, skipped lines included
    pub instances: usize,
    /// Ground-truth characters
    pub chars: usize,
    /// Summed edit distances
    pub char_errors: usize,
    /// Summed synchronization errors
    pub sync_errors: usize,
    /// Merged confusion counts
    pub confusion: ConfusionTable,
}

impl CorpusTotals {
    /// Fold one line into the totals
    pub fn add_line(&mut self, line: &LineEvaluation) {
        self.instances += 1;
        self.chars += line.char_count;
        self.char_errors += line.char_errors;
        self.sync_errors += line.sync_errors;
        self.confusion.merge(&line.confusion);
    }

    /// Totals of a single line
    pub fn from_line(line: &LineEvaluation) -> Self {
        let mut totals = Self::default();
        totals.add_line(line);
        totals
    }

    /// Derive the final aggregate
    ///
    /// Fails with [`EvalError::EmptyCorpus`] when no ground-truth characters
    /// were counted.
    pub fn finish(self, lines: Option<Vec<LineEvaluation>>) -> Result<CorpusAggregate> {
        if self.chars == 0 {
            return Err(EvalError::EmptyCorpus {
                instances: self.instances,
            });
        }

        Ok(CorpusAggregate {
            avg_label_error_rate: self.char_errors as f64 / self.chars as f64,
            total_instances: self.instances,
            total_chars: self.chars,
            total_char_errors: self.char_errors,
            total_sync_errors: self.sync_errors,
            confusion: self.confusion,
            lines,
        })
    }
}

impl Monoid for CorpusTotals {
    fn identity() -> Self {
        Self::default()
    }

    fn combine(&self, other: &Self) -> Self {
        let mut confusion = self.confusion.clone();
        confusion.merge(&other.confusion);

        Self {
            instances: self.instances + other.instances,
            chars: self.chars + other.chars,
            char_errors: self.char_errors + other.char_errors,
            sync_errors: self.sync_errors + other.sync_errors,
            confusion,
        }
    }
}

/// Corpus-level evaluation result
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct CorpusAggregate {
    /// Number of evaluated lines
    pub total_instances: usize,
    /// Ground-truth characters across the corpus
    pub total_chars: usize,
    /// Summed edit distances
    pub total_char_errors: usize,
    /// Summed synchronization errors
    pub total_sync_errors: usize,
    /// Mismatched fragment pairs across the corpus
    pub confusion: ConfusionTable,
    /// `total_char_errors / total_chars`
    pub avg_label_error_rate: f64,
    /// Per-line records in input order, when retained
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub lines: Option<Vec<LineEvaluation>>,
}

impl CorpusAggregate {
    /// The additive counters of this aggregate
    pub fn totals(&self) -> CorpusTotals {
        CorpusTotals {
            instances: self.total_instances,
            chars: self.total_chars,
            char_errors: self.total_char_errors,
            sync_errors: self.total_sync_errors,
            confusion: self.confusion.clone(),
        }
    }

    /// Combine with the aggregate of a following sub-corpus
    ///
    /// Retained lines are concatenated when both sides kept them.
    pub fn merge(self, other: CorpusAggregate) -> Result<CorpusAggregate> {
        let totals = self.totals().combine(&other.totals());
        let lines = match (self.lines, other.lines) {
            (Some(mut head), Some(tail)) => {
                head.extend(tail);
                Some(head)
            }
            _ => None,
        };
        totals.finish(lines)
    }
}

/// Fold per-line records into a corpus aggregate
///
/// Records are folded in the order given; with `retain_all` they are kept in
/// that same order.
pub fn aggregate<I>(records: I, retain_all: bool) -> Result<CorpusAggregate>
where
    I: IntoIterator<Item = LineEvaluation>,
{
    let mut totals = CorpusTotals::default();
    let mut lines = Vec::new();

    for record in records {
        totals.add_line(&record);
        if retain_all {
            lines.push(record);
        }
    }

    totals.finish(retain_all.then_some(lines))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluation::evaluate_pair;
    use crate::monoid::MonoidReduce;

    fn records(pairs: &[(&str, &str)], skip_empty_gt: bool) -> Vec<LineEvaluation> {
        pairs
            .iter()
            .map(|(gt, pred)| evaluate_pair(gt, pred, skip_empty_gt))
            .collect()
    }

    #[test]
    fn test_two_line_corpus_with_skip() {
        let result = aggregate(records(&[("ab", "ab"), ("", "x")], true), true).unwrap();

        assert_eq!(result.total_instances, 2);
        assert_eq!(result.total_chars, 2);
        assert_eq!(result.total_char_errors, 0);
        assert_eq!(result.total_sync_errors, 0);
        assert_eq!(result.avg_label_error_rate, 0.0);
        assert!(result.confusion.is_empty());

        let lines = result.lines.unwrap();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], LineEvaluation::skipped(("", "x").into()));
    }

    #[test]
    fn test_empty_corpus_is_an_error() {
        let err = aggregate(Vec::new(), false).unwrap_err();
        assert!(matches!(err, EvalError::EmptyCorpus { instances: 0 }));

        let err = aggregate(records(&[("", "abc")], false), false).unwrap_err();
        assert!(matches!(err, EvalError::EmptyCorpus { instances: 1 }));
    }

    #[test]
    fn test_rate_and_confusion_totals() {
        let result = aggregate(
            records(&[("hello", "helo"), ("cat", "dog"), ("hill", "hil")], false),
            false,
        )
        .unwrap();

        assert_eq!(result.total_chars, 12);
        assert_eq!(result.total_char_errors, 5);
        assert_eq!(result.total_sync_errors, 5);
        assert!((result.avg_label_error_rate - 5.0 / 12.0).abs() < 1e-12);
        assert_eq!(result.confusion.get("l", ""), 2);
        assert!(result.lines.is_none());
    }

    #[test]
    fn test_partition_then_merge_matches_direct_fold() {
        let all = records(
            &[("abc", "abd"), ("x", "y"), ("lorem", "ipsum"), ("ok", "ok")],
            false,
        );

        let direct = aggregate(all.clone(), true).unwrap();
        let left = aggregate(all[..1].to_vec(), true).unwrap();
        let right = aggregate(all[1..].to_vec(), true).unwrap();

        assert_eq!(left.merge(right).unwrap(), direct);
    }

    #[test]
    fn test_totals_tree_reduction() {
        let all = records(&[("aa", "ab"), ("bb", "b"), ("cc", "cd"), ("", "e")], false);

        let reduced = CorpusTotals::reduce(all.iter().map(CorpusTotals::from_line));
        let direct = aggregate(all, false).unwrap();

        assert_eq!(reduced, direct.totals());
    }
}
