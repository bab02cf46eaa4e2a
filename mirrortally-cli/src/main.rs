//! MirrorTally CLI - Command-line interface
//!
//! Aggregates a package's downloads over F-Droid mirror logs and writes a
//! shields.io endpoint badge.

mod commands;
mod error;
mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use commands::run::RunArgs;
use commands::ConfigArgs;

#[derive(Debug, Parser)]
#[command(name = "mirrortally", version, about)]
struct Cli {
    /// Configuration file (INI). Defaults to ./mirrortally.ini when present
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Also write logs to this file
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Aggregate downloads and write the badge file
    Run(RunArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init(cli.verbose, cli.log_file.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(cli.config.as_deref(), args),
        Commands::Config(args) => commands::show_config(cli.config.as_deref(), args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Command failed");
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
