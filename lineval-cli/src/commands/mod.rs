//! CLI command implementations

use anyhow::Result;
use clap::{Parser, Subcommand};

pub mod eval;
pub mod experiment;
pub mod generate_config;

/// Character error evaluation of OCR line transcriptions
#[derive(Debug, Parser)]
#[command(name = "lineval", version, about, long_about = None)]
pub struct Cli {
    /// Command to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Evaluate predicted lines against ground truth
    Eval(eval::EvalArgs),

    /// Compare several prediction sets against one ground truth
    Experiment(experiment::ExperimentArgs),

    /// Write a configuration file with default values
    GenerateConfig(generate_config::GenerateConfigArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Eval(args) => args.execute(),
            Commands::Experiment(args) => args.execute(),
            Commands::GenerateConfig(args) => args.execute(),
        }
    }
}

/// Initialize logging based on verbosity level
///
/// `RUST_LOG` takes precedence over the verbosity flags.
pub(crate) fn init_logging(verbose: u8, quiet: bool) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level))
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_eval() {
        let cli = Cli::try_parse_from(["lineval", "eval", "--gt", "a.gt.txt", "b.gt.txt", "-j", "4"]).unwrap();

        match cli.command {
            Commands::Eval(args) => {
                assert_eq!(args.gt, vec!["a.gt.txt", "b.gt.txt"]);
                assert_eq!(args.threads, Some(4));
            }
            other => panic!("expected eval, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_experiment() {
        let cli = Cli::try_parse_from([
            "lineval",
            "experiment",
            "--gt",
            "*.gt.txt",
            "--pred-ext",
            ".model0.txt",
            ".model1.txt",
        ])
        .unwrap();

        match cli.command {
            Commands::Experiment(args) => assert_eq!(args.pred_ext.len(), 2),
            other => panic!("expected experiment, got {other:?}"),
        }
    }

    #[test]
    fn test_eval_requires_ground_truth() {
        assert!(Cli::try_parse_from(["lineval", "eval"]).is_err());
    }
}
