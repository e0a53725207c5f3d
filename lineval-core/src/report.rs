//! Ranked confusion report

use crate::aggregate::CorpusAggregate;

#[cfg(feature = "serde")]
use serde::Serialize;

/// One row of a confusion report
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConfusionEntry {
    /// Ground-truth fragment
    pub ground_truth: String,
    /// Predicted fragment
    pub prediction: String,
    /// Number of occurrences
    pub count: usize,
    /// Fraction of all synchronization errors caused by this confusion
    pub share: f64,
}

/// Most frequent confusions of a corpus
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct ConfusionReport {
    /// Shown entries, most frequent first
    pub entries: Vec<ConfusionEntry>,
    /// Fraction of synchronization errors not covered by `entries`
    pub hidden_share: f64,
    /// Distinct confusions in the corpus
    pub total_confusions: usize,
}

impl ConfusionReport {
    /// Rank the confusions of `aggregate`, keeping at most `limit` entries
    ///
    /// `None` keeps every entry.
    pub fn build(aggregate: &CorpusAggregate, limit: Option<usize>) -> Self {
        let total_confusions = aggregate.confusion.len();
        if aggregate.total_sync_errors == 0 {
            return Self {
                total_confusions,
                ..Default::default()
            };
        }

        let total = aggregate.total_sync_errors as f64;
        let entries: Vec<ConfusionEntry> = aggregate
            .confusion
            .ranked()
            .into_iter()
            .take(limit.unwrap_or(usize::MAX))
            .map(|((gt, pred), count)| {
                let weight = gt.chars().count().max(pred.chars().count());
                ConfusionEntry {
                    ground_truth: gt.clone(),
                    prediction: pred.clone(),
                    count,
                    share: (count * weight) as f64 / total,
                }
            })
            .collect();

        let shown: f64 = entries.iter().map(|entry| entry.share).sum();
        Self {
            entries,
            hidden_share: (1.0 - shown).max(0.0),
            total_confusions,
        }
    }

    /// Whether the report has no rows
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
