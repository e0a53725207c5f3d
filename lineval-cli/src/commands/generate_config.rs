//! Generate config command implementation

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

/// Arguments for the generate-config command
#[derive(Debug, Args)]
pub struct GenerateConfigArgs {
    /// Output file path
    #[arg(short, long, value_name = "FILE", required = true)]
    pub output: PathBuf,
}

impl GenerateConfigArgs {
    /// Execute the generate-config command
    pub fn execute(&self) -> Result<()> {
        use std::fs;

        println!("Generating configuration template...");
        println!("  Output file: {}", self.output.display());

        fs::write(&self.output, Self::generate_template())
            .with_context(|| format!("Failed to write to {}", self.output.display()))?;

        println!("✓ Configuration template generated successfully!");
        println!();
        println!("Use it for evaluation:");
        println!(
            "   lineval eval --gt 'data/*.gt.txt' --config {}",
            self.output.display()
        );

        Ok(())
    }

    /// Template configuration content with all defaults
    fn generate_template() -> &'static str {
        r#"# lineval configuration
#
# Command-line flags take precedence over values in this file.

[evaluation]
# Exclude lines whose ground truth is empty from all totals
skip_empty_gt = false

# Number of worker threads (0 = one per CPU)
worker_count = 1

# Keep per-line records in the result (JSON output)
retain_lines = true

# Reject lines longer than this many characters (unset = no limit)
# max_line_chars = 10000

# Name prefix of worker threads
thread_name_prefix = "lineval-worker"

[output]
# text, json or markdown
default_format = "text"

# Number of most common confusions to show (-1 = all)
n_confusions = 10

# Pretty print JSON output
pretty_json = true

[input]
# Extension of prediction files next to the ground truth
pred_ext = ".pred.txt"

# Missing prediction files: error, skip or empty
missing_prediction = "error"
"#
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CliConfig;
    use tempfile::TempDir;

    #[test]
    fn test_template_parses_to_defaults() {
        let config: CliConfig = toml::from_str(GenerateConfigArgs::generate_template()).unwrap();
        assert_eq!(config, CliConfig::default());
    }

    #[test]
    fn test_execute_success() {
        let temp_dir = TempDir::new().unwrap();
        let output_path = temp_dir.path().join("lineval.toml");

        let args = GenerateConfigArgs {
            output: output_path.clone(),
        };

        assert!(args.execute().is_ok());
        assert_eq!(CliConfig::load(&output_path).unwrap(), CliConfig::default());
    }

    #[test]
    fn test_execute_reports_unwritable_path() {
        let args = GenerateConfigArgs {
            output: PathBuf::from("/nonexistent/dir/lineval.toml"),
        };

        let err = args.execute().unwrap_err();
        assert!(err.to_string().contains("Failed to write to"));
    }
}
