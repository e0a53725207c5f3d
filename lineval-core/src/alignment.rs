//! Minimum edit-distance alignment and synchronization blocks
//!
//! [`align`] fills a `(len(a)+1) x (len(b)+1)` table of suffix distances,
//! where cell `(i, j)` holds the edit distance between `a[i..]` and `b[j..]`,
//! and then walks it forward from `(0, 0)`. Whenever several operations keep
//! the path optimal the walk prefers match, then substitution, then
//! insertion, then deletion, so equal inputs always produce the same path.
//!
//! The path is then grouped into [`SyncBlock`]s. Every match is a block of
//! its own. A run of mismatches between two matches becomes one block, unless
//! the run consists only of substitutions, in which case every substitution
//! stays a separate one-character block.

#[cfg(feature = "serde")]
use serde::Serialize;

/// A single step of an alignment from ground truth to prediction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditOp {
    /// Both characters are equal
    Match,
    /// One ground-truth character was recognised as a different one
    Substitute,
    /// The prediction contains an extra character
    Insert,
    /// A ground-truth character is missing from the prediction
    Delete,
}

impl EditOp {
    /// Cost of the operation under unit Levenshtein weights
    pub fn cost(self) -> usize {
        match self {
            EditOp::Match => 0,
            EditOp::Substitute | EditOp::Insert | EditOp::Delete => 1,
        }
    }

    fn consumes_ground_truth(self) -> bool {
        !matches!(self, EditOp::Insert)
    }

    fn consumes_prediction(self) -> bool {
        !matches!(self, EditOp::Delete)
    }
}

/// A pair of aligned fragments
///
/// Matched blocks hold identical fragments. Mismatched blocks may have an
/// empty side for pure insertions or deletions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct SyncBlock {
    /// Fragment taken from the ground truth
    pub ground_truth: String,
    /// Fragment taken from the prediction
    pub prediction: String,
}

impl SyncBlock {
    /// Create a block from two fragments
    pub fn new(ground_truth: impl Into<String>, prediction: impl Into<String>) -> Self {
        Self {
            ground_truth: ground_truth.into(),
            prediction: prediction.into(),
        }
    }

    /// Whether both fragments are equal
    pub fn is_match(&self) -> bool {
        self.ground_truth == self.prediction
    }

    /// Number of visually distinct characters this block accounts for
    ///
    /// This is the longer fragment's length for mismatches and zero for
    /// matched blocks.
    pub fn error_weight(&self) -> usize {
        if self.is_match() {
            0
        } else {
            self.ground_truth
                .chars()
                .count()
                .max(self.prediction.chars().count())
        }
    }

    /// Borrow the block as a `(ground_truth, prediction)` tuple
    pub fn as_pair(&self) -> (&str, &str) {
        (&self.ground_truth, &self.prediction)
    }
}

impl<G: Into<String>, P: Into<String>> From<(G, P)> for SyncBlock {
    fn from((ground_truth, prediction): (G, P)) -> Self {
        Self::new(ground_truth, prediction)
    }
}

/// Result of aligning two character sequences
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment {
    distance: usize,
    operations: Vec<EditOp>,
    blocks: Vec<SyncBlock>,
}

impl Alignment {
    /// Minimum number of edits between the two sequences
    pub fn distance(&self) -> usize {
        self.distance
    }

    /// The chosen edit path, from the start of both sequences
    pub fn operations(&self) -> &[EditOp] {
        &self.operations
    }

    /// Synchronization blocks partitioning both sequences
    pub fn blocks(&self) -> &[SyncBlock] {
        &self.blocks
    }

    /// Consume the alignment, keeping only its blocks
    pub fn into_blocks(self) -> Vec<SyncBlock> {
        self.blocks
    }

    /// Blocks that contribute to error statistics
    pub fn mismatches(&self) -> impl Iterator<Item = &SyncBlock> {
        self.blocks.iter().filter(|block| !block.is_match())
    }

    /// Blocks with adjacent matched blocks merged into runs
    ///
    /// Mismatched blocks are left untouched. Aligning a sequence with itself
    /// yields a single matched block holding the whole sequence.
    pub fn coalesced(&self) -> Vec<SyncBlock> {
        let mut merged: Vec<SyncBlock> = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match merged.last_mut() {
                Some(last) if last.is_match() && block.is_match() => {
                    last.ground_truth.push_str(&block.ground_truth);
                    last.prediction.push_str(&block.prediction);
                }
                _ => merged.push(block.clone()),
            }
        }
        merged
    }
}

/// Row-major table of suffix edit distances
struct CostTable {
    cols: usize,
    cells: Vec<usize>,
}

impl CostTable {
    fn build(a: &[char], b: &[char]) -> Self {
        let rows = a.len() + 1;
        let cols = b.len() + 1;
        let mut table = Self {
            cols,
            cells: vec![0; rows * cols],
        };

        for i in (0..rows).rev() {
            for j in (0..cols).rev() {
                let cost = if i == a.len() {
                    b.len() - j
                } else if j == b.len() {
                    a.len() - i
                } else if a[i] == b[j] {
                    table.get(i + 1, j + 1)
                } else {
                    1 + table
                        .get(i + 1, j + 1)
                        .min(table.get(i, j + 1))
                        .min(table.get(i + 1, j))
                };
                table.cells[i * cols + j] = cost;
            }
        }

        table
    }

    #[inline]
    fn get(&self, i: usize, j: usize) -> usize {
        self.cells[i * self.cols + j]
    }

    /// Walk the optimal path forward using the fixed tie-break order
    fn trace(&self, a: &[char], b: &[char]) -> Vec<EditOp> {
        let mut operations = Vec::with_capacity(a.len().max(b.len()));
        let (mut i, mut j) = (0, 0);

        while i < a.len() || j < b.len() {
            let here = self.get(i, j);
            let op = if i < a.len() && j < b.len() && a[i] == b[j] {
                EditOp::Match
            } else if i < a.len() && j < b.len() && here == self.get(i + 1, j + 1) + 1 {
                EditOp::Substitute
            } else if j < b.len() && here == self.get(i, j + 1) + 1 {
                EditOp::Insert
            } else {
                EditOp::Delete
            };

            if op.consumes_ground_truth() {
                i += 1;
            }
            if op.consumes_prediction() {
                j += 1;
            }
            operations.push(op);
        }

        operations
    }
}

/// Accumulates the mismatches between two matches
#[derive(Default)]
struct PendingRun {
    steps: Vec<(Option<char>, Option<char>)>,
}

impl PendingRun {
    fn push(&mut self, gt: Option<char>, pred: Option<char>) {
        self.steps.push((gt, pred));
    }

    fn flush_into(&mut self, blocks: &mut Vec<SyncBlock>) {
        if self.steps.is_empty() {
            return;
        }

        let substitutions_only = self
            .steps
            .iter()
            .all(|(gt, pred)| gt.is_some() && pred.is_some());

        if substitutions_only {
            for (gt, pred) in self.steps.drain(..) {
                blocks.push(SyncBlock::new(
                    gt.map(String::from).unwrap_or_default(),
                    pred.map(String::from).unwrap_or_default(),
                ));
            }
        } else {
            let ground_truth: String = self.steps.iter().filter_map(|(gt, _)| *gt).collect();
            let prediction: String = self.steps.iter().filter_map(|(_, pred)| *pred).collect();
            self.steps.clear();
            blocks.push(SyncBlock {
                ground_truth,
                prediction,
            });
        }
    }
}

fn synchronize(a: &[char], b: &[char], operations: &[EditOp]) -> Vec<SyncBlock> {
    let mut blocks = Vec::new();
    let mut run = PendingRun::default();
    let (mut i, mut j) = (0, 0);

    for &op in operations {
        let gt = op.consumes_ground_truth().then(|| a[i]);
        let pred = op.consumes_prediction().then(|| b[j]);
        i += usize::from(gt.is_some());
        j += usize::from(pred.is_some());

        if op == EditOp::Match {
            run.flush_into(&mut blocks);
            let ch = String::from(a[i - 1]);
            blocks.push(SyncBlock::new(ch.clone(), ch));
        } else {
            run.push(gt, pred);
        }
    }
    run.flush_into(&mut blocks);

    blocks
}

/// Align two character sequences
///
/// Runs in `O(len(a) * len(b))` time and space.
pub fn align(a: &[char], b: &[char]) -> Alignment {
    let table = CostTable::build(a, b);
    let operations = table.trace(a, b);
    let blocks = synchronize(a, b, &operations);

    Alignment {
        distance: table.get(0, 0),
        operations,
        blocks,
    }
}

/// Align two strings character by character
pub fn align_str(ground_truth: &str, prediction: &str) -> Alignment {
    let a: Vec<char> = ground_truth.chars().collect();
    let b: Vec<char> = prediction.chars().collect();
    align(&a, &b)
}

/// Levenshtein distance between two strings without building an alignment
///
/// Uses two rows of the cost table, so memory stays linear in the
/// prediction length.
pub fn edit_distance(ground_truth: &str, prediction: &str) -> usize {
    let a: Vec<char> = ground_truth.chars().collect();
    let b: Vec<char> = prediction.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, a_ch) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, b_ch) in b.iter().enumerate() {
            let cost = usize::from(a_ch != b_ch);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}
