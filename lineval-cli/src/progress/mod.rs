//! Progress reporting module

use indicatif::{ProgressBar, ProgressStyle};
use lineval_core::EvaluationObserver;
use std::time::Duration;

/// Progress bar over evaluated lines
pub struct ProgressReporter {
    progress_bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter for `total_lines` lines; hidden when `quiet`
    pub fn new(total_lines: u64, quiet: bool) -> Self {
        if quiet || total_lines == 0 {
            return Self { progress_bar: None };
        }

        let pb = ProgressBar::new(total_lines);
        match ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} lines {msg}")
        {
            Ok(style) => pb.set_style(style.progress_chars("##-")),
            Err(e) => log::debug!("progress template rejected: {e}"),
        }
        pb.enable_steady_tick(Duration::from_millis(100));

        Self {
            progress_bar: Some(pb),
        }
    }

    /// A reporter that never draws
    pub fn hidden() -> Self {
        Self { progress_bar: None }
    }

    /// Whether a bar is drawn
    pub fn is_visible(&self) -> bool {
        self.progress_bar.is_some()
    }

    /// Label shown next to the bar
    pub fn set_message(&self, message: impl Into<String>) {
        if let Some(pb) = &self.progress_bar {
            pb.set_message(message.into());
        }
    }
}

impl EvaluationObserver for ProgressReporter {
    fn on_line_evaluated(&self, _index: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.inc(1);
        }
    }

    fn on_finished(&self, _total: usize) {
        if let Some(pb) = &self.progress_bar {
            pb.finish_and_clear();
        }
    }
}
