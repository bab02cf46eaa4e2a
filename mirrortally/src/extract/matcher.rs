//! Attribution of log paths to the target package.

/// Path prefix of APK downloads in the repository.
pub const DEFAULT_REPO_PREFIX: &str = "/repo/";

/// Path prefix of the package metadata API.
pub const DEFAULT_API_PREFIX: &str = "/api/v1/packages/";

const APK_SUFFIX: &str = ".apk";

/// What a matching path credits to the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credit<'p> {
    /// Download of the given version.
    Download { version: &'p str },
    /// Metadata API lookup.
    Metadata,
}

/// Matches log paths against one package identifier.
///
/// Matching is exact on the package segment: `com.example.app` does not
/// match `/repo/com.example.app.pro_3.apk`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMatcher {
    package_id: String,
    repo_prefix: String,
    api_prefix: String,
}

impl PackageMatcher {
    /// Create a matcher with the default path prefixes.
    pub fn new(package_id: impl Into<String>) -> Self {
        Self {
            package_id: package_id.into(),
            repo_prefix: DEFAULT_REPO_PREFIX.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }

    /// Set the repository path prefix.
    pub fn with_repo_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.repo_prefix = prefix.into();
        self
    }

    /// Set the metadata API path prefix.
    pub fn with_api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// The target package identifier.
    pub fn package_id(&self) -> &str {
        &self.package_id
    }

    /// Classify a log path, returning what it credits to the target package.
    pub fn match_path<'p>(&self, path: &'p str) -> Option<Credit<'p>> {
        if let Some((package, version)) = self.split_artifact(path) {
            return (package == self.package_id).then_some(Credit::Download { version });
        }

        match path.strip_prefix(self.api_prefix.as_str()) {
            Some(package) if package == self.package_id => Some(Credit::Metadata),
            _ => None,
        }
    }

    /// Split an artifact path into `(package, version)`.
    ///
    /// Query parameters are dropped at the first `?` or `&`. The name is
    /// split on its last underscore since package identifiers may contain
    /// underscores but version tokens do not.
    pub fn split_artifact<'p>(&self, path: &'p str) -> Option<(&'p str, &'p str)> {
        let path = match path.find(['?', '&']) {
            Some(idx) => &path[..idx],
            None => path,
        };

        let name = path
            .strip_prefix(self.repo_prefix.as_str())?
            .strip_suffix(APK_SUFFIX)?;

        match name.rsplit_once('_') {
            Some((package, version)) if !package.is_empty() && !version.is_empty() => {
                Some((package, version))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matcher() -> PackageMatcher {
        PackageMatcher::new("com.olaf.rereminder")
    }

    #[test]
    fn test_artifact_path_credits_version() {
        assert_eq!(
            matcher().match_path("/repo/com.olaf.rereminder_102.apk"),
            Some(Credit::Download { version: "102" })
        );
    }

    #[test]
    fn test_artifact_path_with_query_is_stripped() {
        assert_eq!(
            matcher().match_path("/repo/com.olaf.rereminder_102.apk&pxdate=2024-01-01"),
            Some(Credit::Download { version: "102" })
        );
        assert_eq!(
            matcher().match_path("/repo/com.olaf.rereminder_102.apk?src=web&x=1"),
            Some(Credit::Download { version: "102" })
        );
    }

    #[test]
    fn test_other_package_is_ignored() {
        assert_eq!(matcher().match_path("/repo/other.pkg_5.apk"), None);
    }

    #[test]
    fn test_prefix_sharing_package_is_not_matched() {
        assert_eq!(
            matcher().match_path("/repo/com.olaf.rereminder.pro_7.apk"),
            None
        );
        assert_eq!(
            matcher().match_path("/repo/xcom.olaf.rereminder_7.apk"),
            None
        );
    }

    #[test]
    fn test_underscore_in_package_id_splits_on_last() {
        let matcher = PackageMatcher::new("org.some_app");
        assert_eq!(
            matcher.match_path("/repo/org.some_app_42.apk"),
            Some(Credit::Download { version: "42" })
        );
    }

    #[test]
    fn test_malformed_artifact_names_are_discarded() {
        let m = matcher();
        assert_eq!(m.split_artifact("/repo/com.olaf.rereminder.apk"), None);
        assert_eq!(m.split_artifact("/repo/com.olaf.rereminder_.apk"), None);
        assert_eq!(m.split_artifact("/repo/_102.apk"), None);
        assert_eq!(m.split_artifact("/repo/com.olaf.rereminder_102.apk.asc"), None);
        assert_eq!(m.split_artifact("/archive/com.olaf.rereminder_102.apk"), None);
    }

    #[test]
    fn test_metadata_path_is_exact() {
        let m = matcher();
        assert_eq!(
            m.match_path("/api/v1/packages/com.olaf.rereminder"),
            Some(Credit::Metadata)
        );
        assert_eq!(m.match_path("/api/v1/packages/com.olaf.rereminder/"), None);
        assert_eq!(m.match_path("/api/v1/packages/com.olaf"), None);
    }

    #[test]
    fn test_custom_prefixes() {
        let m = matcher()
            .with_repo_prefix("/fdroid/repo/")
            .with_api_prefix("/api/v2/packages/");
        assert_eq!(
            m.match_path("/fdroid/repo/com.olaf.rereminder_9.apk"),
            Some(Credit::Download { version: "9" })
        );
        assert_eq!(
            m.match_path("/api/v2/packages/com.olaf.rereminder"),
            Some(Credit::Metadata)
        );
        assert_eq!(m.match_path("/repo/com.olaf.rereminder_9.apk"), None);
    }
}
