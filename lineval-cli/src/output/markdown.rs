//! Markdown output formatter

use super::{percent, ReportFormatter};
use anyhow::Result;
use lineval_core::{ConfusionReport, CorpusAggregate};
use std::io::Write;

/// Markdown formatter - summary and confusions as tables
pub struct MarkdownFormatter<W: Write> {
    writer: W,
    evaluation_count: usize,
}

impl<W: Write> MarkdownFormatter<W> {
    /// Create a new markdown formatter
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            evaluation_count: 0,
        }
    }
}

/// Escape a fragment for use inside a table cell
fn cell(fragment: &str) -> String {
    let escaped = fragment.replace('\\', "\\\\").replace('|', "\\|");
    format!("{{{escaped}}}")
}

impl<W: Write + Send + Sync> ReportFormatter for MarkdownFormatter<W> {
    fn write_evaluation(&mut self, result: &CorpusAggregate, report: &ConfusionReport) -> Result<()> {
        if self.evaluation_count > 0 {
            writeln!(self.writer)?;
        }
        self.evaluation_count += 1;

        writeln!(self.writer, "# Evaluation result")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| Metric | Value |")?;
        writeln!(self.writer, "|---|---:|")?;
        writeln!(self.writer, "| Lines | {} |", result.total_instances)?;
        writeln!(self.writer, "| Total chars | {} |", result.total_chars)?;
        writeln!(self.writer, "| Char errors | {} |", result.total_char_errors)?;
        writeln!(self.writer, "| Sync errors | {} |", result.total_sync_errors)?;
        writeln!(
            self.writer,
            "| Label error rate | {} |",
            percent(result.avg_label_error_rate)
        )?;

        if report.is_empty() {
            return Ok(());
        }

        writeln!(self.writer)?;
        writeln!(self.writer, "## Confusions")?;
        writeln!(self.writer)?;
        writeln!(self.writer, "| GT | PRED | COUNT | PERCENT |")?;
        writeln!(self.writer, "|---|---|---:|---:|")?;
        for entry in &report.entries {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} |",
                cell(&entry.ground_truth),
                cell(&entry.prediction),
                entry.count,
                percent(entry.share)
            )?;
        }
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "*Hidden errors: {} of {} distinct confusions not shown*",
            percent(report.hidden_share),
            report.total_confusions
        )?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
