//! Download statistics for one package.

use std::collections::BTreeMap;

/// Downloads and metadata hits attributed to the target package.
///
/// Produced per (mirror, log file); summed with [`PackageStat::merge`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageStat {
    /// Artifact downloads.
    pub downloads: u64,

    /// Metadata API lookups.
    pub metadata_hits: u64,

    /// Downloads per version token. Only path-keyed logs carry versions.
    pub versions: BTreeMap<String, u64>,
}

impl PackageStat {
    /// Credit `hits` downloads, optionally to a specific version.
    pub(crate) fn add_download(&mut self, version: Option<&str>, hits: u64) {
        self.downloads = self.downloads.saturating_add(hits);
        if let Some(version) = version {
            add_to(self.versions.entry(version.to_string()).or_insert(0), hits);
        }
    }

    /// Credit `hits` metadata lookups.
    pub(crate) fn add_metadata(&mut self, hits: u64) {
        self.metadata_hits = self.metadata_hits.saturating_add(hits);
    }

    /// Add another stat into this one.
    ///
    /// Counts saturate at `u64::MAX` rather than wrapping.
    pub fn merge(&mut self, other: &PackageStat) {
        self.downloads = self.downloads.saturating_add(other.downloads);
        self.metadata_hits = self.metadata_hits.saturating_add(other.metadata_hits);
        for (version, hits) in &other.versions {
            add_to(self.versions.entry(version.clone()).or_insert(0), *hits);
        }
    }
}

fn add_to(count: &mut u64, hits: u64) {
    *count = count.saturating_add(hits);
}
