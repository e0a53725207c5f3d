//! Plain text output formatter

use super::{percent, ReportFormatter};
use anyhow::Result;
use lineval_core::{ConfusionReport, CorpusAggregate};
use std::io::{self, Write};

/// Plain text formatter - headline followed by the confusion table
pub struct TextFormatter<W: Write> {
    writer: W,
}

impl<W: Write> TextFormatter<W> {
    /// Create a new text formatter
    pub fn new(writer: W) -> Self {
        Self { writer }
    }
}

impl TextFormatter<io::Stdout> {
    /// Create a formatter that writes to stdout
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send + Sync> ReportFormatter for TextFormatter<W> {
    fn write_evaluation(&mut self, result: &CorpusAggregate, report: &ConfusionReport) -> Result<()> {
        writeln!(self.writer, "Evaluation result")?;
        writeln!(self.writer, "=================")?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Got mean normalized label error rate of {} ({} errs, {} total chars, {} sync errs)",
            percent(result.avg_label_error_rate),
            result.total_char_errors,
            result.total_chars,
            result.total_sync_errors
        )?;

        if report.is_empty() {
            return Ok(());
        }

        writeln!(self.writer, "{:<8} {:<8} {:>8} {:>10}", "GT", "PRED", "COUNT", "PERCENT")?;
        for entry in &report.entries {
            writeln!(
                self.writer,
                "{:<8} {:<8} {:>8} {:>10}",
                format!("{{{}}}", entry.ground_truth),
                format!("{{{}}}", entry.prediction),
                entry.count,
                percent(entry.share)
            )?;
        }
        writeln!(
            self.writer,
            "The remaining but hidden errors make up {}",
            percent(report.hidden_share)
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::test_support::{sample, SharedBuffer};

    #[test]
    fn test_headline_and_table() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());
        let (result, report) = sample(Some(10));

        formatter.write_evaluation(&result, &report).unwrap();
        formatter.finish().unwrap();

        let output = buffer.contents();
        assert!(output.starts_with("Evaluation result\n=================\n\n"));
        assert!(output.contains(
            "Got mean normalized label error rate of 50.00% (4 errs, 8 total chars, 4 sync errs)"
        ));
        assert!(output.contains("{l}      {}              1     25.00%"));
        assert!(output.contains("The remaining but hidden errors make up 0.00%"));
    }

    #[test]
    fn test_zero_confusions_prints_headline_only() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());
        let (result, report) = sample(Some(0));

        formatter.write_evaluation(&result, &report).unwrap();

        let output = buffer.contents();
        assert!(output.contains("label error rate of 50.00%"));
        assert!(!output.contains("PRED"));
        assert!(!output.contains("hidden"));
    }

    #[test]
    fn test_limit_reports_hidden_share() {
        let buffer = SharedBuffer::default();
        let mut formatter = TextFormatter::new(buffer.clone());
        let (result, report) = sample(Some(1));

        formatter.write_evaluation(&result, &report).unwrap();

        let output = buffer.contents();
        assert!(output.contains("{a}      {o}"));
        assert!(!output.contains("{t}"));
        assert!(output.contains("hidden errors make up 75.00%"));
    }
}
