//! lineval command-line entry point

use clap::Parser;
use lineval_cli::commands::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
