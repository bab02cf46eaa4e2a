//! Badge output errors.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors writing the badge file.
#[derive(Debug, Error)]
pub enum BadgeError {
    /// The descriptor could not be serialized.
    #[error("failed to serialize badge: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The badge file could not be written.
    #[error("failed to write {}: {source}", path.display())]
    WriteFailed { path: PathBuf, source: io::Error },
}
