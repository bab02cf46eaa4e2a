//! Per-mirror and aggregate results.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::extract::PackageStat;
use crate::index::IndexError;

/// Outcome of resolving a mirror's index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MirrorStatus {
    /// The index was read and its window scanned.
    Scanned,
    /// The mirror publishes no index.
    NoIndex,
    /// The index could not be fetched or parsed, or the scan aborted.
    Unavailable { reason: String },
}

impl From<&IndexError> for MirrorStatus {
    fn from(e: &IndexError) -> Self {
        match e {
            IndexError::NotFound { .. } => MirrorStatus::NoIndex,
            other => MirrorStatus::Unavailable {
                reason: other.to_string(),
            },
        }
    }
}

/// What one mirror contributed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorSummary {
    /// Mirror host name.
    pub mirror: String,

    /// Index outcome.
    pub status: MirrorStatus,

    /// Log files in the selected window.
    pub logs_selected: usize,

    /// Log files that could not be fetched or decoded.
    pub logs_unreadable: usize,

    /// Sum over the readable log files.
    pub stat: PackageStat,
}

impl MirrorSummary {
    /// A summary for a mirror that contributed nothing.
    pub fn empty(mirror: impl Into<String>, status: MirrorStatus) -> Self {
        Self {
            mirror: mirror.into(),
            status,
            logs_selected: 0,
            logs_unreadable: 0,
            stat: PackageStat::default(),
        }
    }

    /// Log files that were read successfully.
    pub fn logs_read(&self) -> usize {
        self.logs_selected - self.logs_unreadable
    }
}

/// Totals of one run across all mirrors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    /// When the result was produced.
    pub generated_at: DateTime<Utc>,

    /// Per-mirror summaries in configured mirror order.
    pub mirrors: Vec<MirrorSummary>,

    /// Grand totals.
    pub totals: PackageStat,
}

impl AggregateResult {
    /// Fold per-mirror summaries into grand totals.
    pub fn from_summaries(mirrors: Vec<MirrorSummary>, generated_at: DateTime<Utc>) -> Self {
        let mut totals = PackageStat::default();
        for summary in &mirrors {
            totals.merge(&summary.stat);
        }

        Self {
            generated_at,
            mirrors,
            totals,
        }
    }

    /// Total artifact downloads.
    pub fn total_downloads(&self) -> u64 {
        self.totals.downloads
    }

    /// Total metadata API lookups.
    pub fn total_metadata_hits(&self) -> u64 {
        self.totals.metadata_hits
    }

    /// Downloads per version token across all mirrors.
    pub fn versions(&self) -> &BTreeMap<String, u64> {
        &self.totals.versions
    }

    /// Log files read successfully across all mirrors.
    pub fn logs_read(&self) -> usize {
        self.mirrors.iter().map(MirrorSummary::logs_read).sum()
    }

    /// Log files skipped as unreadable across all mirrors.
    pub fn logs_unreadable(&self) -> usize {
        self.mirrors.iter().map(|m| m.logs_unreadable).sum()
    }
}
