//! Character-level evaluation of OCR line transcriptions
//!
//! The crate compares ground-truth text lines with predicted lines and
//! reports character error statistics for a whole corpus:
//!
//! - [`alignment`]: minimum edit-distance alignment and synchronization blocks
//! - [`evaluation`]: statistics for a single line pair
//! - [`aggregate`]: reduction of line statistics into corpus totals
//! - [`parallel`]: evaluation of a corpus on a worker pool
//! - [`evaluator`]: several prediction sets against one ground truth
//! - [`report`]: ranked confusion report
//!
//! Results are identical for every worker count: lines are evaluated
//! independently and folded in input order.
//!
//! # Example
//!
//! ```rust
//! use lineval_core::evaluate_corpus;
//!
//! let ground_truth = ["hello", "cat"];
//! let predictions = ["helo", "dog"];
//!
//! let result = evaluate_corpus(&ground_truth, &predictions, false, 2).unwrap();
//! assert_eq!(result.total_chars, 8);
//! assert_eq!(result.total_char_errors, 4);
//! assert_eq!(result.confusion.get("l", ""), 1);
//! ```

#![warn(missing_docs)]

pub mod aggregate;
pub mod alignment;
pub mod config;
pub mod confusion;
pub mod error;
pub mod evaluation;
pub mod evaluator;
pub mod monoid;
pub mod parallel;
pub mod report;

pub use aggregate::{aggregate, CorpusAggregate, CorpusTotals};
pub use alignment::{align, align_str, edit_distance, Alignment, EditOp, SyncBlock};
pub use config::{EvaluatorConfig, EvaluatorConfigBuilder};
pub use confusion::{ConfusionKey, ConfusionTable};
pub use error::{EvalError, LineError, Result, Side};
pub use evaluation::{evaluate_pair, LineEvaluation, LinePair, PairEvaluator};
pub use evaluator::Evaluator;
pub use monoid::{Monoid, MonoidReduce};
pub use parallel::{evaluate_corpus, EvaluationObserver, NoopObserver, ParallelEvaluator};
pub use report::{ConfusionEntry, ConfusionReport};
