//! Run command - aggregate downloads and write the badge.

use std::path::{Path, PathBuf};

use clap::Args;
use mirrortally::aggregate::{AggregateResult, MirrorStatus};
use mirrortally::badge::{write_badge, BadgeDescriptor};
use mirrortally::config::TallyConfig;
use mirrortally::index::LogWindow;
use mirrortally::source::ReqwestClient;

use super::load_config;
use crate::error::CliError;

/// Arguments for the run command.
#[derive(Debug, Default, Args)]
pub struct RunArgs {
    /// Package identifier to count (e.g. com.example.app)
    #[arg(short, long)]
    pub package: Option<String>,

    /// Logs per mirror: a number of most recent logs, or "all"
    #[arg(short, long)]
    pub window: Option<LogWindow>,

    /// Mirror to scan (repeatable; replaces the configured list)
    #[arg(short, long = "mirror")]
    pub mirrors: Vec<String>,

    /// Badge file to write
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Per-request timeout in seconds
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Scan mirrors in parallel
    #[arg(long)]
    pub parallel: bool,
}

impl RunArgs {
    /// Apply CLI overrides on top of the loaded configuration.
    pub fn apply(self, mut config: TallyConfig) -> TallyConfig {
        if let Some(package) = self.package {
            config = config.with_package(package);
        }
        if let Some(window) = self.window {
            config = config.with_window(window);
        }
        if !self.mirrors.is_empty() {
            config = config.with_mirrors(self.mirrors);
        }
        if let Some(output) = self.output {
            config = config.with_output(output);
        }
        if let Some(secs) = self.timeout {
            config.source.timeout = std::time::Duration::from_secs(secs);
        }
        if self.parallel {
            config = config.with_parallel(true);
        }
        config
    }
}

/// Run the aggregation.
pub fn run(config_path: Option<&Path>, args: RunArgs) -> Result<(), CliError> {
    let config = args.apply(load_config(config_path)?);
    config.validate()?;

    let client = ReqwestClient::with_timeout(config.source.timeout)?;
    let result = mirrortally::tally(&config, &client);

    let badge = BadgeDescriptor::from_result(&result, &config.badge.style);
    write_badge(&config.badge.output, &badge)?;

    print_summary(&config, &result, &badge);
    Ok(())
}

fn print_summary(config: &TallyConfig, result: &AggregateResult, badge: &BadgeDescriptor) {
    println!(
        "{} - {} per mirror",
        config.package.id,
        window_phrase(config.package.window)
    );
    for mirror in &result.mirrors {
        let detail = match &mirror.status {
            MirrorStatus::Scanned => format!(
                "{} downloads from {} logs ({} unreadable)",
                mirror.stat.downloads,
                mirror.logs_read(),
                mirror.logs_unreadable
            ),
            MirrorStatus::NoIndex => "no index".to_string(),
            MirrorStatus::Unavailable { reason } => format!("unavailable: {}", reason),
        };
        println!("  {:<28} {}", mirror.mirror, detail);
    }
    println!();
    println!("Total downloads:      {}", result.total_downloads());
    println!("Metadata lookups:     {}", result.total_metadata_hits());
    println!(
        "Badge:                {} -> {}",
        badge.message,
        config.badge.output.display()
    );
}

fn window_phrase(window: LogWindow) -> String {
    match window {
        LogWindow::Recent(n) => format!("last {} logs", n),
        LogWindow::All => "all logs".to_string(),
    }
}
