//! Fetches one log file and extracts the package's statistics.

use tracing::debug;

use super::error::ExtractError;
use super::matcher::PackageMatcher;
use super::payload::LogPayload;
use super::stat::PackageStat;
use crate::source::{HttpClient, MirrorEndpoints};

/// Extracts [`PackageStat`]s from a mirror's log files.
///
/// Holds no state between files.
pub struct LogExtractor<'a> {
    client: &'a dyn HttpClient,
    endpoints: &'a MirrorEndpoints,
    matcher: &'a PackageMatcher,
}

impl<'a> LogExtractor<'a> {
    /// Create an extractor for the matcher's package.
    pub fn new(
        client: &'a dyn HttpClient,
        endpoints: &'a MirrorEndpoints,
        matcher: &'a PackageMatcher,
    ) -> Self {
        Self {
            client,
            endpoints,
            matcher,
        }
    }

    /// Fetch, decode and tally one log file.
    ///
    /// An error means the log is unreadable; callers count it as zero.
    pub fn extract(&self, mirror: &str, log_file: &str) -> Result<PackageStat, ExtractError> {
        let url = self.endpoints.log_url(mirror, log_file);
        let body = self.client.get(&url)?;
        let payload = LogPayload::decode(&body)?;
        let stat = payload.tally(self.matcher);

        debug!(
            mirror,
            log_file,
            entries = payload.len(),
            downloads = stat.downloads,
            metadata_hits = stat.metadata_hits,
            "Extracted log"
        );
        Ok(stat)
    }
}
