//! Frequency table of mismatched fragment pairs

use crate::alignment::SyncBlock;
use std::collections::btree_map::{self, BTreeMap};

#[cfg(feature = "serde")]
use serde::{ser::SerializeSeq, Serialize, Serializer};

/// Key of a confusion entry: `(ground_truth_fragment, predicted_fragment)`
pub type ConfusionKey = (String, String);

/// Counts how often each mismatched fragment pair was observed
///
/// Merging is a plain per-key sum, so tables can be combined in any order.
/// Pairs with equal fragments are never stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfusionTable {
    counts: BTreeMap<ConfusionKey, usize>,
}

impl ConfusionTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `count` occurrences of a fragment pair
    ///
    /// Returns `false` and leaves the table unchanged when the fragments are
    /// equal or `count` is zero.
    pub fn add(&mut self, ground_truth: &str, prediction: &str, count: usize) -> bool {
        if ground_truth == prediction || count == 0 {
            return false;
        }
        *self
            .counts
            .entry((ground_truth.to_string(), prediction.to_string()))
            .or_insert(0) += count;
        true
    }

    /// Record one occurrence of a synchronization block
    pub fn record(&mut self, block: &SyncBlock) -> bool {
        self.add(&block.ground_truth, &block.prediction, 1)
    }

    /// Fold another table into this one
    pub fn merge(&mut self, other: &ConfusionTable) {
        for ((gt, pred), count) in &other.counts {
            *self.counts.entry((gt.clone(), pred.clone())).or_insert(0) += count;
        }
    }

    /// Fold another table into this one, reusing its keys
    pub fn merge_owned(&mut self, other: ConfusionTable) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (key, count) in other.counts {
            *self.counts.entry(key).or_insert(0) += count;
        }
    }

    /// Occurrences of a fragment pair
    pub fn get(&self, ground_truth: &str, prediction: &str) -> usize {
        self.counts
            .get(&(ground_truth.to_string(), prediction.to_string()))
            .copied()
            .unwrap_or(0)
    }

    /// Number of distinct fragment pairs
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether no confusions were recorded
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts
    pub fn total_occurrences(&self) -> usize {
        self.counts.values().sum()
    }

    /// Iterate entries in key order
    pub fn iter(&self) -> btree_map::Iter<'_, ConfusionKey, usize> {
        self.counts.iter()
    }

    /// Entries sorted by descending count, ties broken by key
    pub fn ranked(&self) -> Vec<(&ConfusionKey, usize)> {
        let mut entries: Vec<_> = self.counts.iter().map(|(key, &count)| (key, count)).collect();
        // BTreeMap iteration is already key-ordered; a stable sort keeps it for ties
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl<'a> IntoIterator for &'a ConfusionTable {
    type Item = (&'a ConfusionKey, &'a usize);
    type IntoIter = btree_map::Iter<'a, ConfusionKey, usize>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> FromIterator<&'a SyncBlock> for ConfusionTable {
    fn from_iter<I: IntoIterator<Item = &'a SyncBlock>>(iter: I) -> Self {
        let mut table = ConfusionTable::new();
        for block in iter {
            table.record(block);
        }
        table
    }
}

/// Serialized as a ranked list, since JSON maps cannot use tuple keys
#[cfg(feature = "serde")]
impl Serialize for ConfusionTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        #[derive(Serialize)]
        struct Entry<'a> {
            ground_truth: &'a str,
            prediction: &'a str,
            count: usize,
        }

        let ranked = self.ranked();
        let mut seq = serializer.serialize_seq(Some(ranked.len()))?;
        for ((gt, pred), count) in ranked {
            seq.serialize_element(&Entry {
                ground_truth: gt,
                prediction: pred,
                count,
            })?;
        }
        seq.end()
    }
}
