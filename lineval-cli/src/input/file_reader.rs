//! File reading utilities

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Reader for single-line transcription files
pub struct FileReader;

impl FileReader {
    /// Read a file as UTF-8 text
    pub fn read_text(path: &Path) -> Result<String> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display()))?;

        Ok(content)
    }

    /// Read a transcription, dropping trailing line terminators
    pub fn read_line(path: &Path) -> Result<String> {
        let mut content = Self::read_text(path)?;
        let trimmed_len = content.trim_end_matches(&['\n', '\r'][..]).len();
        content.truncate(trimmed_len);
        Ok(content)
    }
}
