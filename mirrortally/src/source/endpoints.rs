//! URL layout of the metrics host.

/// Metrics host publishing per-mirror access log snapshots.
pub const DEFAULT_BASE_URL: &str = "https://fdroid.gitlab.io/metrics/";

/// Name of the per-mirror index resource.
pub const INDEX_FILENAME: &str = "index.json";

/// Builds the index and log URLs for a mirror.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorEndpoints {
    base_url: String,
}

impl Default for MirrorEndpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl MirrorEndpoints {
    /// Create endpoints rooted at `base_url`.
    ///
    /// A trailing `/` is appended when missing.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self { base_url }
    }

    /// URL of the mirror's log index.
    pub fn index_url(&self, mirror: &str) -> String {
        format!("{}{}/{}", self.base_url, mirror, INDEX_FILENAME)
    }

    /// URL of one log file on the mirror.
    pub fn log_url(&self, mirror: &str, log_file: &str) -> String {
        format!("{}{}/{}", self.base_url, mirror, log_file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_url() {
        let endpoints = MirrorEndpoints::default();
        assert_eq!(
            endpoints.index_url("http02.fdroid.net"),
            "https://fdroid.gitlab.io/metrics/http02.fdroid.net/index.json"
        );
    }

    #[test]
    fn test_log_url() {
        let endpoints = MirrorEndpoints::default();
        assert_eq!(
            endpoints.log_url("http03.fdroid.net", "2024-01-08.json"),
            "https://fdroid.gitlab.io/metrics/http03.fdroid.net/2024-01-08.json"
        );
    }

    #[test]
    fn test_base_url_gets_trailing_slash() {
        let endpoints = MirrorEndpoints::new("http://localhost:8080/metrics");
        assert_eq!(
            endpoints.index_url("m1"),
            "http://localhost:8080/metrics/m1/index.json"
        );
    }
}
