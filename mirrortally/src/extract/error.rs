//! Errors for a single log file.

use thiserror::Error;

use crate::source::FetchError;

/// Why a log file contributed nothing.
///
/// All variants are absorbed by the orchestrator and counted as unreadable.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ExtractError {
    /// The log could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The body is not valid JSON.
    #[error("log is not valid JSON: {0}")]
    Parse(String),

    /// Valid JSON, but neither a path-keyed nor a package-keyed snapshot.
    #[error("unrecognized log payload: {0}")]
    Unrecognized(String),
}
