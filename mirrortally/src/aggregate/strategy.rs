//! Scan strategies for visiting the configured mirrors.
//!
//! This module implements the Strategy pattern for sequential vs parallel
//! mirror scans.

use std::thread;

use tracing::error;

use super::result::{MirrorStatus, MirrorSummary};

/// Strategy for scanning a set of mirrors.
pub trait ScanStrategy: Send + Sync {
    /// Scan every mirror with `scan_one`.
    ///
    /// Returns one summary per mirror, in the order of `mirrors`.
    fn scan(
        &self,
        mirrors: &[String],
        scan_one: &(dyn Fn(&str) -> MirrorSummary + Sync),
    ) -> Vec<MirrorSummary>;
}

/// Sequential scan strategy.
///
/// One outstanding request at a time; mirrors are visited in order.
#[derive(Debug, Default)]
pub struct SequentialScan;

impl SequentialScan {
    /// Create a new sequential strategy.
    pub fn new() -> Self {
        Self
    }
}

impl ScanStrategy for SequentialScan {
    fn scan(
        &self,
        mirrors: &[String],
        scan_one: &(dyn Fn(&str) -> MirrorSummary + Sync),
    ) -> Vec<MirrorSummary> {
        mirrors.iter().map(|mirror| scan_one(mirror.as_str())).collect()
    }
}

/// Parallel scan strategy.
///
/// Mirrors are scanned on scoped threads in batches of `concurrency`. Each
/// thread returns its own summary, so there is no shared accumulator; a slow
/// mirror only delays the batch it belongs to, bounded by the client's
/// per-request timeout.
#[derive(Debug)]
pub struct ParallelScan {
    /// Maximum number of mirrors scanned at once.
    pub concurrency: usize,
}

impl ParallelScan {
    /// Create a new parallel strategy.
    ///
    /// # Arguments
    ///
    /// * `concurrency` - Maximum number of concurrent mirror scans (minimum 1)
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }
}

impl Default for ParallelScan {
    fn default() -> Self {
        Self::new(4)
    }
}

impl ScanStrategy for ParallelScan {
    fn scan(
        &self,
        mirrors: &[String],
        scan_one: &(dyn Fn(&str) -> MirrorSummary + Sync),
    ) -> Vec<MirrorSummary> {
        let mut summaries = Vec::with_capacity(mirrors.len());

        for batch in mirrors.chunks(self.concurrency) {
            thread::scope(|scope| {
                let handles: Vec<_> = batch
                    .iter()
                    .map(|mirror| (mirror, scope.spawn(move || scan_one(mirror.as_str()))))
                    .collect();

                for (mirror, handle) in handles {
                    let summary = handle.join().unwrap_or_else(|_| {
                        error!(mirror = %mirror, "Mirror scan panicked");
                        MirrorSummary::empty(
                            mirror.as_str(),
                            MirrorStatus::Unavailable {
                                reason: "scan panicked".to_string(),
                            },
                        )
                    });
                    summaries.push(summary);
                }
            });
        }

        summaries
    }
}
