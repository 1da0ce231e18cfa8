//! swarmdoc CLI - documentation page generator.
//!
//! Provides commands for:
//! - `generate`: Generate MDX pages from docs and skills
//! - `check`: Verify published pages match their sources

mod commands;
mod error;
mod output;

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::{CheckArgs, GenerateArgs};
use output::Output;

/// swarmdoc - Documentation page generator.
#[derive(Parser)]
#[command(name = "swarmdoc", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate site pages from docs and skills.
    Generate(GenerateArgs),
    /// Check that published pages are up-to-date with their sources.
    Check(CheckArgs),
}

impl Commands {
    fn verbose(&self) -> bool {
        match self {
            Self::Generate(args) => args.corpus.verbose,
            Self::Check(args) => args.corpus.verbose,
        }
    }
}

/// Filter from `RUST_LOG`, or `warn` when it is unset or invalid.
fn default_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let output = Output::new();

    // --verbose enables INFO level, otherwise use RUST_LOG or default to WARN
    let filter = if cli.command.verbose() {
        EnvFilter::new("info")
    } else {
        default_filter()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        Commands::Generate(args) => args.execute(),
        Commands::Check(args) => args.execute(),
    };

    match result {
        Ok(status) => status.into(),
        Err(err) => {
            output.error(&format!("Error: {err}"));
            ExitCode::FAILURE
        }
    }
}
