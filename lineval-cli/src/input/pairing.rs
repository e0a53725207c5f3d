//! Matching ground-truth files with prediction files

use super::FileReader;
use crate::error::CliError;
use anyhow::Result;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// How to treat prediction files that do not exist
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingPrediction {
    /// Fail naming the missing file
    #[default]
    Error,
    /// Leave the pair out of the evaluation
    Skip,
    /// Evaluate the pair against an empty prediction
    Empty,
}

/// A ground-truth file and its prediction file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePair {
    /// Ground-truth transcription
    pub ground_truth: PathBuf,
    /// Predicted transcription
    pub prediction: PathBuf,
}

/// Split a path into its base and all of its extensions
///
/// `dir/line_01.gt.txt` becomes `("dir/line_01", ".gt.txt")`. Leading dots
/// of hidden files are part of the base.
pub fn split_all_ext(path: &Path) -> (PathBuf, String) {
    let name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return (path.to_path_buf(), String::new()),
    };

    let leading = name.len() - name.trim_start_matches('.').len();
    match name[leading..].find('.') {
        Some(pos) => {
            let split = leading + pos;
            (path.with_file_name(&name[..split]), name[split..].to_string())
        }
        None => (path.to_path_buf(), String::new()),
    }
}

/// Prediction path next to a ground-truth file
pub fn prediction_path(ground_truth: &Path, pred_ext: &str) -> PathBuf {
    let (base, _) = split_all_ext(ground_truth);
    let mut name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    name.push_str(pred_ext);
    base.with_file_name(name)
}

/// Pair ground-truth files with predictions
///
/// Explicit prediction files are paired by position and must match the
/// ground-truth count. Without them, each prediction path is derived from
/// the ground-truth path using `pred_ext`.
pub fn pair_files(
    ground_truths: Vec<PathBuf>,
    predictions: Option<Vec<PathBuf>>,
    pred_ext: &str,
    mode: MissingPrediction,
) -> Result<Vec<FilePair>> {
    let predictions = match predictions {
        Some(predictions) => {
            if predictions.len() != ground_truths.len() {
                return Err(CliError::PairMismatch {
                    ground_truths: ground_truths.len(),
                    predictions: predictions.len(),
                }
                .into());
            }
            predictions
        }
        None => ground_truths
            .iter()
            .map(|gt| prediction_path(gt, pred_ext))
            .collect(),
    };

    let mut pairs = Vec::with_capacity(ground_truths.len());
    let mut skipped = 0;
    for (ground_truth, prediction) in ground_truths.into_iter().zip(predictions) {
        if !prediction.is_file() {
            match mode {
                MissingPrediction::Error => {
                    return Err(CliError::FileNotFound(prediction.display().to_string()).into());
                }
                MissingPrediction::Skip => {
                    log::debug!("skipping {}: no prediction", ground_truth.display());
                    skipped += 1;
                    continue;
                }
                MissingPrediction::Empty => {
                    log::debug!("{} missing, using empty prediction", prediction.display());
                }
            }
        }
        pairs.push(FilePair {
            ground_truth,
            prediction,
        });
    }

    if skipped > 0 {
        log::warn!("skipped {skipped} pair(s) without prediction file");
    }

    Ok(pairs)
}

/// Read transcriptions in parallel, keeping their order
///
/// With [`MissingPrediction::Empty`] a missing file reads as an empty line.
pub fn load_lines(paths: &[PathBuf], mode: MissingPrediction) -> Result<Vec<String>> {
    paths
        .par_iter()
        .map(|path| {
            if mode == MissingPrediction::Empty && !path.exists() {
                Ok(String::new())
            } else {
                FileReader::read_line(path)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_split_all_ext() {
        assert_eq!(
            split_all_ext(Path::new("data/line_01.gt.txt")),
            (PathBuf::from("data/line_01"), ".gt.txt".to_string())
        );
        assert_eq!(
            split_all_ext(Path::new("plain")),
            (PathBuf::from("plain"), String::new())
        );
        assert_eq!(
            split_all_ext(Path::new(".hidden.txt")),
            (PathBuf::from(".hidden"), ".txt".to_string())
        );
    }

    #[test]
    fn test_prediction_path() {
        assert_eq!(
            prediction_path(Path::new("data/line_01.gt.txt"), ".pred.txt"),
            PathBuf::from("data/line_01.pred.txt")
        );
    }

    fn setup(names: &[&str]) -> TempDir {
        let temp_dir = TempDir::new().unwrap();
        for name in names {
            fs::write(temp_dir.path().join(name), format!("{name}\n")).unwrap();
        }
        temp_dir
    }

    #[test]
    fn test_missing_prediction_modes() {
        let dir = setup(&["a.gt.txt", "a.pred.txt", "b.gt.txt"]);
        let gts = vec![dir.path().join("a.gt.txt"), dir.path().join("b.gt.txt")];

        let err = pair_files(gts.clone(), None, ".pred.txt", MissingPrediction::Error).unwrap_err();
        assert!(err.to_string().contains("b.pred.txt"));

        let skipped = pair_files(gts.clone(), None, ".pred.txt", MissingPrediction::Skip).unwrap();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].prediction, dir.path().join("a.pred.txt"));

        let empty = pair_files(gts, None, ".pred.txt", MissingPrediction::Empty).unwrap();
        assert_eq!(empty.len(), 2);
        let preds: Vec<PathBuf> = empty.into_iter().map(|p| p.prediction).collect();
        let lines = load_lines(&preds, MissingPrediction::Empty).unwrap();
        assert_eq!(lines, vec!["a.pred.txt".to_string(), String::new()]);
    }

    #[test]
    fn test_explicit_predictions_must_match_count() {
        let dir = setup(&["a.gt.txt", "b.gt.txt", "x.txt"]);
        let gts = vec![dir.path().join("a.gt.txt"), dir.path().join("b.gt.txt")];

        let err = pair_files(gts, Some(vec![dir.path().join("x.txt")]), ".pred.txt", MissingPrediction::Error)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::PairMismatch {
                ground_truths: 2,
                predictions: 1
            })
        ));
    }

    #[test]
    fn test_load_lines_keeps_order() {
        let names: Vec<String> = (0..20).map(|i| format!("l{i:02}.gt.txt")).collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let dir = setup(&refs);

        let paths: Vec<PathBuf> = names.iter().map(|n| dir.path().join(n)).collect();
        let lines = load_lines(&paths, MissingPrediction::Error).unwrap();
        assert_eq!(lines, names);
    }
}
