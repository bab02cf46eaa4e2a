//! CLI command implementations.

pub mod run;

use std::path::{Path, PathBuf};

use clap::Args;
use mirrortally::config::TallyConfig;
use tracing::debug;

use crate::error::CliError;

/// Configuration file picked up from the working directory.
pub const LOCAL_CONFIG_FILE: &str = "mirrortally.ini";

/// Arguments for the config command.
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Only print the path of the configuration file in use
    #[arg(long)]
    pub path: bool,
}

/// Resolve the configuration file: explicit path > ./mirrortally.ini > none.
pub fn config_file(explicit: Option<&Path>) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None => {
            let local = PathBuf::from(LOCAL_CONFIG_FILE);
            local.is_file().then_some(local)
        }
    }
}

/// Load the configuration, falling back to built-in defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<TallyConfig, CliError> {
    match config_file(explicit) {
        Some(path) => {
            debug!(path = %path.display(), "Loading configuration");
            Ok(TallyConfig::load(&path)?)
        }
        None => {
            debug!("No configuration file, using defaults");
            Ok(TallyConfig::default())
        }
    }
}

/// Print the effective configuration.
pub fn show_config(explicit: Option<&Path>, args: ConfigArgs) -> Result<(), CliError> {
    let file = config_file(explicit);

    if args.path {
        match &file {
            Some(path) => println!("{}", path.display()),
            None => println!("(built-in defaults)"),
        }
        return Ok(());
    }

    let config = load_config(explicit)?;
    let style = &config.badge.style;

    println!("Configuration Settings");
    println!("======================");
    match &file {
        Some(path) => println!("File: {}", path.display()),
        None => println!("File: (built-in defaults)"),
    }
    println!();
    println!("[source]");
    println!("  base_url = {}", config.source.base_url);
    println!("  mirrors = {}", config.source.mirrors.join(", "));
    println!("  timeout_secs = {}", config.source.timeout.as_secs());
    println!("  parallel = {}", config.source.parallel);
    println!();
    println!("[package]");
    println!("  id = {}", config.package.id);
    println!("  window = {}", config.package.window);
    println!("  repo_prefix = {}", config.package.repo_prefix);
    println!("  api_prefix = {}", config.package.api_prefix);
    println!();
    println!("[badge]");
    println!("  output = {}", config.badge.output.display());
    println!("  label = {}", style.label);
    println!("  color = {}", style.color);
    println!("  zero_color = {}", style.zero_color);
    match style.cache_seconds {
        Some(secs) => println!("  cache_seconds = {}", secs),
        None => println!("  cache_seconds = none"),
    }
    println!("  number_format = {}", style.number_format);
    println!("  timestamp = {}", style.include_timestamp);

    Ok(())
}
