//! Output formatting module

use anyhow::{Context, Result};
use lineval_core::{ConfusionReport, CorpusAggregate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Trait for report formatters
pub trait ReportFormatter: Send + Sync {
    /// Format the result of one corpus evaluation
    fn write_evaluation(&mut self, result: &CorpusAggregate, report: &ConfusionReport)
        -> Result<()>;

    /// Finalize output (e.g., write buffered JSON)
    fn finish(&mut self) -> Result<()>;
}

pub mod json;
pub mod markdown;
pub mod text;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use text::TextFormatter;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable summary and confusion table
    #[default]
    Text,
    /// JSON document with the full result
    Json,
    /// Markdown tables
    Markdown,
}

/// Writer sink shared by all formatters
pub type Sink = Box<dyn Write + Send + Sync>;

/// Open the output destination, stdout when no path is given
pub fn open_sink(path: Option<&Path>) -> Result<Sink> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            Ok(Box::new(BufWriter::new(file)))
        }
        None => Ok(Box::new(io::stdout())),
    }
}

/// Build the formatter for `format`
pub fn create_formatter(format: OutputFormat, sink: Sink, pretty_json: bool) -> Box<dyn ReportFormatter> {
    match format {
        OutputFormat::Text => Box::new(TextFormatter::new(sink)),
        OutputFormat::Json => Box::new(JsonFormatter::new(sink, pretty_json)),
        OutputFormat::Markdown => Box::new(MarkdownFormatter::new(sink)),
    }
}

/// Render a fraction as a percentage with two decimals
pub(crate) fn percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent() {
        assert_eq!(percent(0.5), "50.00%");
        assert_eq!(percent(1.0 / 3.0), "33.33%");
        assert_eq!(percent(0.0), "0.00%");
    }

    #[test]
    fn test_open_sink_reports_bad_path() {
        let err = open_sink(Some(Path::new("/nonexistent/dir/report.txt"))).err().unwrap();
        assert!(err.to_string().contains("Failed to create output file"));
    }
}
