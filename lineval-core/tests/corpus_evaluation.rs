//! End-to-end corpus evaluation scenarios

use lineval_core::{
    evaluate_corpus, ConfusionReport, EvalError, Evaluator, EvaluatorConfig, LinePair,
    ParallelEvaluator,
};

#[test]
fn test_hello_helo_scenario() {
    let result = evaluate_corpus(&["hello"], &["helo"], false, 1).unwrap();

    assert_eq!(result.total_char_errors, 1);
    assert_eq!(result.total_sync_errors, 1);
    assert_eq!(result.confusion.len(), 1);
    assert_eq!(result.confusion.get("l", ""), 1);
}

#[test]
fn test_cat_dog_scenario() {
    let result = evaluate_corpus(&["cat"], &["dog"], false, 1).unwrap();

    assert_eq!(result.total_char_errors, 3);
    assert_eq!(result.total_sync_errors, 3);
    assert_eq!(result.confusion.get("c", "d"), 1);
    assert_eq!(result.confusion.get("a", "o"), 1);
    assert_eq!(result.confusion.get("t", "g"), 1);
    assert!((result.avg_label_error_rate - 1.0).abs() < 1e-12);
}

#[test]
fn test_skip_empty_ground_truth_scenario() {
    let result = evaluate_corpus(&["ab", ""], &["ab", "x"], true, 2).unwrap();

    assert_eq!(result.total_instances, 2);
    assert_eq!(result.total_chars, 2);
    assert_eq!(result.total_char_errors, 0);
    assert_eq!(result.total_sync_errors, 0);
    assert_eq!(result.avg_label_error_rate, 0.0);

    let lines = result.lines.unwrap();
    assert_eq!(lines[1].char_count, 0);
    assert_eq!(lines[1].pair, LinePair::new("", "x"));
}

#[test]
fn test_empty_ground_truth_counts_insertions_without_skip() {
    let result = evaluate_corpus(&["ab", ""], &["ab", "xyz"], false, 1).unwrap();

    assert_eq!(result.total_chars, 2);
    assert_eq!(result.total_char_errors, 3);
    assert!((result.avg_label_error_rate - 1.5).abs() < 1e-12);
}

#[test]
fn test_count_mismatch() {
    let err = evaluate_corpus(&["a", "b", "c"], &["a"], false, 4).unwrap_err();
    assert!(matches!(
        err,
        EvalError::CountMismatch {
            ground_truths: 3,
            predictions: 1
        }
    ));
}

#[test]
fn test_all_empty_ground_truth_is_empty_corpus() {
    let err = evaluate_corpus(&["", ""], &["a", "b"], true, 1).unwrap_err();
    assert!(matches!(err, EvalError::EmptyCorpus { instances: 2 }));
}

#[test]
fn test_large_corpus_is_reproducible() {
    let words = ["recognition", "character", "segmentation", "baseline", "ligature"];
    let noisy = ["recogmtion", "charactor", "segmentatiom", "base1ine", "lig ature"];

    let gt: Vec<String> = (0..500).map(|i| words[i % words.len()].to_string()).collect();
    let pred: Vec<String> = (0..500)
        .map(|i| {
            if i % 3 == 0 {
                words[i % words.len()].to_string()
            } else {
                noisy[i % noisy.len()].to_string()
            }
        })
        .collect();

    let baseline = evaluate_corpus(&gt, &pred, false, 1).unwrap();
    for workers in [2, 4, 7] {
        assert_eq!(evaluate_corpus(&gt, &pred, false, workers).unwrap(), baseline);
    }

    let report = ConfusionReport::build(&baseline, Some(3));
    assert_eq!(report.entries.len(), 3);
    assert!(report.entries[0].count >= report.entries[1].count);
    assert!(report.entries[1].count >= report.entries[2].count);
}

#[test]
fn test_evaluator_preloaded_sets() {
    let config = EvaluatorConfig::builder()
        .worker_count(2)
        .retain_lines(false)
        .build()
        .unwrap();
    let mut evaluator = Evaluator::new(config).unwrap();
    evaluator.preload_ground_truth(["line one", "line two"]);

    let single = evaluator
        .evaluate_against_preloaded(&["line one", "1ine two"])
        .unwrap();
    assert_eq!(single.total_char_errors, 1);
    assert_eq!(single.confusion.get("l", "1"), 1);
    assert!(single.lines.is_none());

    let sets = evaluator
        .evaluate_sets(vec![
            ("voted", vec!["line one", "line two"]),
            ("raw", vec!["lin one", "line twa"]),
        ])
        .unwrap();
    assert_eq!(sets["voted"].total_char_errors, 0);
    assert_eq!(sets["raw"].total_char_errors, 2);
}

#[test]
fn test_parallel_evaluator_is_reusable() {
    let config = EvaluatorConfig::builder().worker_count(3).build().unwrap();
    let evaluator = ParallelEvaluator::new(config).unwrap();
    assert_eq!(evaluator.workers(), 3);

    let first = evaluator.evaluate_corpus(&["abc"], &["abd"]).unwrap();
    let second = evaluator.evaluate_corpus(&["abc"], &["abd"]).unwrap();
    assert_eq!(first, second);
}

#[cfg(feature = "serde")]
#[test]
fn test_aggregate_serializes() {
    let result = evaluate_corpus(&["hello"], &["helo"], false, 1).unwrap();
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["total_chars"], 5);
    assert_eq!(json["confusion"][0]["ground_truth"], "l");
    assert_eq!(json["lines"][0]["pair"]["prediction"], "helo");
}
