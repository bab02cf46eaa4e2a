//! Run configuration.
//!
//! Defaults reproduce the reference setup (three F-Droid mirrors, twelve
//! weekly logs, `fdroid-shield.json`). Any value can be overridden from an
//! INI file:
//!
//! ```ini
//! [source]
//! base_url = https://fdroid.gitlab.io/metrics/
//! mirrors = http02.fdroid.net, http03.fdroid.net, originserver.f-droid.org
//! timeout_secs = 10
//! parallel = false
//!
//! [package]
//! id = com.olaf.rereminder
//! window = 12
//!
//! [badge]
//! output = fdroid-shield.json
//! label = F-Droid Downloads
//! number_format = compact
//! ```

mod error;
mod file;

use std::path::PathBuf;
use std::time::Duration;

pub use error::ConfigError;

use crate::badge::BadgeStyle;
use crate::extract::{PackageMatcher, DEFAULT_API_PREFIX, DEFAULT_REPO_PREFIX};
use crate::index::LogWindow;
use crate::source::{MirrorEndpoints, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};

/// Mirrors scanned by default.
pub const DEFAULT_MIRRORS: &[&str] = &[
    "http02.fdroid.net",
    "http03.fdroid.net",
    "originserver.f-droid.org",
];

/// Package counted by default.
pub const DEFAULT_PACKAGE_ID: &str = "com.olaf.rereminder";

/// Badge file written by default.
pub const DEFAULT_OUTPUT: &str = "fdroid-shield.json";

/// Where and how to fetch metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Metrics host base URL.
    pub base_url: String,

    /// Mirrors to scan, in order.
    pub mirrors: Vec<String>,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Scan mirrors on parallel threads.
    pub parallel: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            mirrors: DEFAULT_MIRRORS.iter().map(|m| m.to_string()).collect(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            parallel: false,
        }
    }
}

/// Which package to count and over how many logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageConfig {
    /// Package identifier, e.g. `com.olaf.rereminder`.
    pub id: String,

    /// Logs per mirror.
    pub window: LogWindow,

    /// Path prefix of APK downloads.
    pub repo_prefix: String,

    /// Path prefix of metadata API lookups.
    pub api_prefix: String,
}

impl Default for PackageConfig {
    fn default() -> Self {
        Self {
            id: DEFAULT_PACKAGE_ID.to_string(),
            window: LogWindow::default(),
            repo_prefix: DEFAULT_REPO_PREFIX.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

/// Badge output settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeConfig {
    /// Badge file path.
    pub output: PathBuf,

    /// Presentation.
    pub style: BadgeStyle,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            style: BadgeStyle::default(),
        }
    }
}

/// Complete configuration of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TallyConfig {
    pub source: SourceConfig,
    pub package: PackageConfig,
    pub badge: BadgeConfig,
}

impl TallyConfig {
    /// Set the package identifier.
    pub fn with_package(mut self, id: impl Into<String>) -> Self {
        self.package.id = id.into();
        self
    }

    /// Set the log window.
    pub fn with_window(mut self, window: LogWindow) -> Self {
        self.package.window = window;
        self
    }

    /// Replace the mirror list.
    pub fn with_mirrors<I, S>(mut self, mirrors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.source.mirrors = mirrors.into_iter().map(Into::into).collect();
        self
    }

    /// Set the badge output path.
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.badge.output = output.into();
        self
    }

    /// Enable or disable parallel mirror scans.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.source.parallel = parallel;
        self
    }

    /// Check invariants that cannot be expressed in the types.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.source.mirrors.is_empty() {
            return Err(ConfigError::NoMirrors);
        }
        if self.package.id.trim().is_empty() {
            return Err(ConfigError::invalid("package.id", "", "must not be empty"));
        }
        if self.source.timeout.is_zero() {
            return Err(ConfigError::invalid(
                "source.timeout_secs",
                "0",
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Path matcher for the configured package.
    pub fn matcher(&self) -> PackageMatcher {
        PackageMatcher::new(self.package.id.clone())
            .with_repo_prefix(self.package.repo_prefix.clone())
            .with_api_prefix(self.package.api_prefix.clone())
    }

    /// Endpoints of the configured metrics host.
    pub fn endpoints(&self) -> MirrorEndpoints {
        MirrorEndpoints::new(self.source.base_url.clone())
    }
}
