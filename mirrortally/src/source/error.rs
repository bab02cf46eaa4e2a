//! Transport error taxonomy.

use thiserror::Error;

/// Errors returned by an [`HttpClient`](super::HttpClient).
///
/// `NotFound` is kept apart from the other statuses because a missing index
/// means "this mirror has no data", not a failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    /// The server answered 404.
    #[error("not found: {url}")]
    NotFound { url: String },

    /// The server answered with a non-success status other than 404.
    #[error("HTTP {status} from {url}")]
    Status { url: String, status: u16 },

    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// Connection, TLS or body read failure.
    #[error("request to {url} failed: {reason}")]
    Transport { url: String, reason: String },
}

impl FetchError {
    /// Returns true if the resource does not exist on the server.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
