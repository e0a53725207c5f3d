//! JSON output formatter

use super::ReportFormatter;
use anyhow::Result;
use lineval_core::{ConfusionReport, CorpusAggregate, LineEvaluation};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Write;

/// JSON formatter - buffers evaluations and writes them on finish
pub struct JsonFormatter<W: Write> {
    writer: W,
    pretty: bool,
    documents: Vec<Value>,
}

/// Corpus totals in JSON output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryData {
    /// Evaluated lines
    pub total_instances: usize,
    /// Ground-truth characters
    pub total_chars: usize,
    /// Summed edit distances
    pub total_char_errors: usize,
    /// Summed synchronization errors
    pub total_sync_errors: usize,
    /// Label error rate in `[0, ∞)`
    pub avg_label_error_rate: f64,
}

impl From<&CorpusAggregate> for SummaryData {
    fn from(result: &CorpusAggregate) -> Self {
        Self {
            total_instances: result.total_instances,
            total_chars: result.total_chars,
            total_char_errors: result.total_char_errors,
            total_sync_errors: result.total_sync_errors,
            avg_label_error_rate: result.avg_label_error_rate,
        }
    }
}

#[derive(Serialize)]
struct EvaluationDocument<'a> {
    summary: SummaryData,
    confusions: &'a ConfusionReport,
    #[serde(skip_serializing_if = "Option::is_none")]
    lines: Option<&'a [LineEvaluation]>,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter
    pub fn new(writer: W, pretty: bool) -> Self {
        Self {
            writer,
            pretty,
            documents: Vec::new(),
        }
    }
}

impl<W: Write + Send + Sync> ReportFormatter for JsonFormatter<W> {
    fn write_evaluation(&mut self, result: &CorpusAggregate, report: &ConfusionReport) -> Result<()> {
        let document = EvaluationDocument {
            summary: SummaryData::from(result),
            confusions: report,
            lines: result.lines.as_deref(),
        };
        self.documents.push(serde_json::to_value(document)?);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        let output = match self.documents.len() {
            1 => self.documents.remove(0),
            _ => Value::Array(std::mem::take(&mut self.documents)),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &output)?;
        } else {
            serde_json::to_writer(&mut self.writer, &output)?;
        }
        writeln!(self.writer)?;
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample, SharedBuffer};

    #[test]
    fn test_document_structure() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone(), true);
        let (result, report) = sample(Some(2));

        formatter.write_evaluation(&result, &report).unwrap();
        formatter.finish().unwrap();

        let value: Value = serde_json::from_str(&buffer.contents()).unwrap();
        let summary: SummaryData = serde_json::from_value(value["summary"].clone()).unwrap();
        assert_eq!(summary.total_chars, 8);
        assert_eq!(summary.total_char_errors, 4);
        assert_eq!(summary.avg_label_error_rate, 0.5);

        let entries = value["confusions"]["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0]["ground_truth"], "a");
        assert_eq!(entries[0]["prediction"], "o");
        assert_eq!(value["confusions"]["total_confusions"], 4);
        assert_eq!(value["lines"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_compact_output_is_single_line() {
        let buffer = SharedBuffer::default();
        let mut formatter = JsonFormatter::new(buffer.clone(), false);
        let (mut result, report) = sample(None);
        result.lines = None;

        formatter.write_evaluation(&result, &report).unwrap();
        formatter.finish().unwrap();

        let output = buffer.contents();
        assert_eq!(output.lines().count(), 1);
        let value: Value = serde_json::from_str(&output).unwrap();
        assert!(value.get("lines").is_none());
    }
}
