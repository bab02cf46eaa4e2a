//! Fetches a mirror's index and selects its log window.

use thiserror::Error;
use tracing::{debug, warn};

use super::window::{nonconforming_identifiers, select_window, LogWindow};
use crate::source::{FetchError, HttpClient, MirrorEndpoints};

/// Reasons a mirror's index yields no log files.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IndexError {
    /// The mirror publishes no index.
    #[error("no index published for {mirror}")]
    NotFound { mirror: String },

    /// The index could not be fetched.
    #[error("failed to fetch index for {mirror}: {source}")]
    Fetch {
        mirror: String,
        #[source]
        source: FetchError,
    },

    /// The index was served but is not a JSON array of strings.
    #[error("index for {mirror} is not a list of log names: {reason}")]
    Malformed { mirror: String, reason: String },
}

/// Resolves the log files to scan for a mirror.
pub struct IndexResolver<'a> {
    client: &'a dyn HttpClient,
    endpoints: &'a MirrorEndpoints,
}

impl<'a> IndexResolver<'a> {
    /// Create a resolver over `client`.
    pub fn new(client: &'a dyn HttpClient, endpoints: &'a MirrorEndpoints) -> Self {
        Self { client, endpoints }
    }

    /// Fetch and parse the raw index listing.
    pub fn fetch_index(&self, mirror: &str) -> Result<Vec<String>, IndexError> {
        let url = self.endpoints.index_url(mirror);
        let body = self.client.get(&url).map_err(|source| {
            if source.is_not_found() {
                IndexError::NotFound {
                    mirror: mirror.to_string(),
                }
            } else {
                IndexError::Fetch {
                    mirror: mirror.to_string(),
                    source,
                }
            }
        })?;

        serde_json::from_slice::<Vec<String>>(&body).map_err(|e| IndexError::Malformed {
            mirror: mirror.to_string(),
            reason: e.to_string(),
        })
    }

    /// Resolve the mirror's log window, oldest first.
    ///
    /// An error means the mirror has nothing to scan; callers treat it as a
    /// zero contribution, not a failed run.
    pub fn resolve(&self, mirror: &str, window: LogWindow) -> Result<Vec<String>, IndexError> {
        let identifiers = self.fetch_index(mirror)?;

        let nonconforming = nonconforming_identifiers(&identifiers);
        if !nonconforming.is_empty() {
            warn!(
                mirror,
                count = nonconforming.len(),
                examples = ?&nonconforming[..nonconforming.len().min(3)],
                "Index contains log names without a fixed-width date; window order may not be chronological"
            );
        }

        let selected = select_window(&identifiers, window);
        if let (Some(first), Some(last)) = (selected.first(), selected.last()) {
            debug!(
                mirror,
                listed = identifiers.len(),
                selected = selected.len(),
                first = %first,
                last = %last,
                "Resolved log window"
            );
        }
        Ok(selected)
    }
}
