//! The badge descriptor and its presentation settings.

use serde::{Deserialize, Serialize};

use super::format::NumberFormat;
use crate::aggregate::AggregateResult;

/// Schema version of the shields.io endpoint format.
pub const SCHEMA_VERSION: u32 = 1;

/// Default badge label.
pub const DEFAULT_LABEL: &str = "F-Droid Downloads";

/// Default badge color.
pub const DEFAULT_COLOR: &str = "blue";

/// Default badge color when nothing was counted.
pub const DEFAULT_ZERO_COLOR: &str = "lightgrey";

/// Default downstream cache hint (24 hours).
pub const DEFAULT_CACHE_SECONDS: u64 = 86_400;

/// Presentation settings for the badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeStyle {
    /// Left-hand label text.
    pub label: String,

    /// Color for a non-zero count.
    pub color: String,

    /// Color for a zero count.
    pub zero_color: String,

    /// Cache hint for the badge renderer; omitted when `None`.
    pub cache_seconds: Option<u64>,

    /// Rendering of the count.
    pub number_format: NumberFormat,

    /// Whether to include `lastUpdated`, which changes the file on every run.
    pub include_timestamp: bool,
}

impl Default for BadgeStyle {
    fn default() -> Self {
        Self {
            label: DEFAULT_LABEL.to_string(),
            color: DEFAULT_COLOR.to_string(),
            zero_color: DEFAULT_ZERO_COLOR.to_string(),
            cache_seconds: Some(DEFAULT_CACHE_SECONDS),
            number_format: NumberFormat::default(),
            include_timestamp: true,
        }
    }
}

/// A shields.io endpoint badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadgeDescriptor {
    pub schema_version: u32,
    pub label: String,
    pub message: String,
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cache_seconds: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl BadgeDescriptor {
    /// Build the badge for a run's total downloads.
    pub fn from_result(result: &AggregateResult, style: &BadgeStyle) -> Self {
        let total = result.total_downloads();
        let color = if total == 0 {
            &style.zero_color
        } else {
            &style.color
        };

        Self {
            schema_version: SCHEMA_VERSION,
            label: style.label.clone(),
            message: style.number_format.format(total),
            color: color.clone(),
            cache_seconds: style.cache_seconds,
            last_updated: style
                .include_timestamp
                .then(|| result.generated_at.format("%Y-%m-%d %H:%M UTC").to_string()),
        }
    }
}
