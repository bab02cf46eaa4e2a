//! CLI error types.

use std::fmt;

use mirrortally::badge::BadgeError;
use mirrortally::config::ConfigError;
use mirrortally::source::FetchError;

/// Errors that end the process with a failure status.
///
/// Aggregation itself never fails; only setup and output do.
#[derive(Debug)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid.
    Config(ConfigError),

    /// The HTTP client could not be created.
    Client(FetchError),

    /// The badge file could not be written.
    Output(BadgeError),

    /// Logging could not be initialized.
    Logging(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Config(e) => write!(f, "Configuration error: {}", e),
            CliError::Client(e) => write!(f, "Failed to create HTTP client: {}", e),
            CliError::Output(e) => write!(f, "Failed to write badge: {}", e),
            CliError::Logging(msg) => write!(f, "Failed to initialize logging: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Config(e) => Some(e),
            CliError::Client(e) => Some(e),
            CliError::Output(e) => Some(e),
            CliError::Logging(_) => None,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e)
    }
}

impl From<FetchError> for CliError {
    fn from(e: FetchError) -> Self {
        CliError::Client(e)
    }
}

impl From<BadgeError> for CliError {
    fn from(e: BadgeError) -> Self {
        CliError::Output(e)
    }
}
