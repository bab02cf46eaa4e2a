//! Drives index resolution and log extraction across mirrors.

use chrono::Utc;
use tracing::{debug, info, warn};

use super::result::{AggregateResult, MirrorStatus, MirrorSummary};
use super::strategy::{ScanStrategy, SequentialScan};
use crate::extract::{LogExtractor, PackageMatcher, PackageStat};
use crate::index::{IndexError, IndexResolver, LogWindow};
use crate::source::{HttpClient, MirrorEndpoints};

/// Aggregates a package's downloads over a set of mirrors.
///
/// Failures of single mirrors or log files are absorbed; [`run`](Self::run)
/// always produces a result.
pub struct Aggregator<'a> {
    client: &'a dyn HttpClient,
    endpoints: MirrorEndpoints,
    matcher: PackageMatcher,
    window: LogWindow,
    strategy: Box<dyn ScanStrategy>,
}

impl<'a> Aggregator<'a> {
    /// Create an aggregator with default endpoints, window and a sequential
    /// scan.
    pub fn new(client: &'a dyn HttpClient, matcher: PackageMatcher) -> Self {
        Self {
            client,
            endpoints: MirrorEndpoints::default(),
            matcher,
            window: LogWindow::default(),
            strategy: Box::new(SequentialScan::new()),
        }
    }

    /// Set the metrics host endpoints.
    pub fn with_endpoints(mut self, endpoints: MirrorEndpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    /// Set the log window per mirror.
    pub fn with_window(mut self, window: LogWindow) -> Self {
        self.window = window;
        self
    }

    /// Set the scan strategy.
    pub fn with_strategy(mut self, strategy: Box<dyn ScanStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    /// Scan one mirror's log window.
    pub fn scan_mirror(&self, mirror: &str) -> MirrorSummary {
        let resolver = IndexResolver::new(self.client, &self.endpoints);
        let log_files = match resolver.resolve(mirror, self.window) {
            Ok(files) => files,
            Err(e) => {
                match &e {
                    IndexError::NotFound { .. } => {
                        info!(mirror, "No index found, skipping mirror")
                    }
                    _ => warn!(mirror, error = %e, "Skipping mirror"),
                }
                return MirrorSummary::empty(mirror, MirrorStatus::from(&e));
            }
        };

        let extractor = LogExtractor::new(self.client, &self.endpoints, &self.matcher);
        let mut stat = PackageStat::default();
        let mut unreadable = 0;

        for log_file in &log_files {
            match extractor.extract(mirror, log_file) {
                Ok(log_stat) => stat.merge(&log_stat),
                Err(e) => {
                    unreadable += 1;
                    warn!(mirror, log_file = %log_file, error = %e, "Skipping unreadable log");
                }
            }
        }

        info!(
            mirror,
            logs = log_files.len(),
            unreadable,
            downloads = stat.downloads,
            metadata_hits = stat.metadata_hits,
            "Mirror scanned"
        );

        MirrorSummary {
            mirror: mirror.to_string(),
            status: MirrorStatus::Scanned,
            logs_selected: log_files.len(),
            logs_unreadable: unreadable,
            stat,
        }
    }

    /// Scan every mirror and fold the grand totals.
    pub fn run(&self, mirrors: &[String]) -> AggregateResult {
        info!(
            package = self.matcher.package_id(),
            mirrors = mirrors.len(),
            window = %self.window,
            "Aggregating downloads"
        );

        let summaries = self
            .strategy
            .scan(mirrors, &|mirror: &str| self.scan_mirror(mirror));
        let result = AggregateResult::from_summaries(summaries, Utc::now());

        for (version, downloads) in result.versions() {
            debug!(version = %version, downloads, "Version downloads");
        }
        info!(
            downloads = result.total_downloads(),
            metadata_hits = result.total_metadata_hits(),
            logs_read = result.logs_read(),
            logs_unreadable = result.logs_unreadable(),
            "Aggregation complete"
        );

        result
    }
}
