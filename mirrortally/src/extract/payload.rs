//! Tagged decoding of log snapshots.

use serde_json::{Map, Value};

use super::error::ExtractError;
use super::matcher::{Credit, PackageMatcher};
use super::stat::PackageStat;

/// A decoded log snapshot.
///
/// The shape is classified once per file; anything else is
/// [`ExtractError::Unrecognized`].
#[derive(Debug, Clone, PartialEq)]
pub enum LogPayload {
    /// `{"paths": {"<request path>": hits, ...}}`
    PathKeyed(Map<String, Value>),

    /// `{"packages": {"<package id>": hits, ...}}`
    PackageKeyed(Map<String, Value>),
}

impl LogPayload {
    /// Decode a raw log body.
    pub fn decode(body: &[u8]) -> Result<Self, ExtractError> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| ExtractError::Parse(e.to_string()))?;
        Self::classify(value)
    }

    fn classify(value: Value) -> Result<Self, ExtractError> {
        let mut root = match value {
            Value::Object(root) => root,
            other => {
                return Err(ExtractError::Unrecognized(format!(
                    "expected a JSON object, found {}",
                    json_kind(&other)
                )))
            }
        };

        match root.remove("paths") {
            Some(Value::Object(paths)) => return Ok(LogPayload::PathKeyed(paths)),
            Some(other) => {
                return Err(ExtractError::Unrecognized(format!(
                    "'paths' is {}, expected an object",
                    json_kind(&other)
                )))
            }
            None => {}
        }

        match root.remove("packages") {
            Some(Value::Object(packages)) => Ok(LogPayload::PackageKeyed(packages)),
            Some(other) => Err(ExtractError::Unrecognized(format!(
                "'packages' is {}, expected an object",
                json_kind(&other)
            ))),
            None => Err(ExtractError::Unrecognized(
                "neither 'paths' nor 'packages' present".to_string(),
            )),
        }
    }

    /// Number of entries in the snapshot.
    pub(crate) fn len(&self) -> usize {
        match self {
            LogPayload::PathKeyed(map) | LogPayload::PackageKeyed(map) => map.len(),
        }
    }

    /// Sum everything credited to the matcher's package.
    pub fn tally(&self, matcher: &PackageMatcher) -> PackageStat {
        let mut stat = PackageStat::default();

        match self {
            LogPayload::PathKeyed(paths) => {
                for (path, value) in paths {
                    let hits = hit_count(value);
                    if hits == 0 {
                        continue;
                    }
                    match matcher.match_path(path) {
                        Some(Credit::Download { version }) => {
                            stat.add_download(Some(version), hits)
                        }
                        Some(Credit::Metadata) => stat.add_metadata(hits),
                        None => {}
                    }
                }
            }
            LogPayload::PackageKeyed(packages) => {
                if let Some(value) = packages.get(matcher.package_id()) {
                    stat.add_download(None, hit_count(value));
                }
            }
        }

        stat
    }
}

/// Hit count of one entry: a bare integer or an object with a `hits` field.
///
/// Anything else, including negative or fractional numbers, counts as zero.
pub fn hit_count(value: &Value) -> u64 {
    match value {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::Object(fields) => fields.get("hits").and_then(Value::as_u64).unwrap_or(0),
        _ => 0,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn matcher() -> PackageMatcher {
        PackageMatcher::new("com.olaf.rereminder")
    }

    #[test]
    fn test_hit_count_shapes() {
        assert_eq!(hit_count(&json!(12)), 12);
        assert_eq!(hit_count(&json!({"hits": 7, "errors": 1})), 7);
        assert_eq!(hit_count(&json!({"errors": 1})), 0);
        assert_eq!(hit_count(&json!(-3)), 0);
        assert_eq!(hit_count(&json!(1.5)), 0);
        assert_eq!(hit_count(&json!("12")), 0);
    }

    #[test]
    fn test_decode_path_keyed() {
        let payload = LogPayload::decode(br#"{"hits": 100, "paths": {"/": 3}}"#).unwrap();
        assert!(matches!(payload, LogPayload::PathKeyed(_)));
        assert_eq!(payload.len(), 1);
    }

    #[test]
    fn test_decode_package_keyed() {
        let payload = LogPayload::decode(br#"{"packages": {}}"#).unwrap();
        assert!(matches!(payload, LogPayload::PackageKeyed(_)));
        assert_eq!(payload.len(), 0);
    }

    #[test]
    fn test_decode_rejects_unrecognized_shapes() {
        for body in [
            r#"[1, 2, 3]"#,
            r#"{"queries": {}}"#,
            r#"{"paths": [1, 2]}"#,
            r#"{"packages": 4}"#,
        ] {
            assert!(
                matches!(
                    LogPayload::decode(body.as_bytes()),
                    Err(ExtractError::Unrecognized(_))
                ),
                "{} should be unrecognized",
                body
            );
        }
    }

    #[test]
    fn test_decode_rejects_invalid_json() {
        assert!(matches!(
            LogPayload::decode(b"{not json"),
            Err(ExtractError::Parse(_))
        ));
    }

    #[test]
    fn test_tally_path_keyed() {
        let payload = LogPayload::decode(
            json!({
                "paths": {
                    "/repo/com.olaf.rereminder_101.apk": 10,
                    "/repo/com.olaf.rereminder_102.apk": {"hits": 5},
                    "/repo/com.olaf.rereminder_102.apk&pxdate=2024-01-01": 2,
                    "/repo/com.olaf.rereminder_103.apk": 0,
                    "/repo/other.pkg_5.apk": 99,
                    "/api/v1/packages/com.olaf.rereminder": 4,
                    "/repo/index-v1.jar": 1000
                }
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();

        let stat = payload.tally(&matcher());
        assert_eq!(stat.downloads, 17);
        assert_eq!(stat.metadata_hits, 4);
        assert_eq!(stat.versions.get("101"), Some(&10));
        assert_eq!(stat.versions.get("102"), Some(&7));
        assert!(!stat.versions.contains_key("103"));
    }

    #[test]
    fn test_tally_metadata_never_counts_as_download() {
        let payload = LogPayload::decode(
            br#"{"paths": {"/api/v1/packages/com.olaf.rereminder": 8}}"#,
        )
        .unwrap();

        let stat = payload.tally(&matcher());
        assert_eq!(stat.downloads, 0);
        assert_eq!(stat.metadata_hits, 8);
    }

    #[test]
    fn test_tally_huge_counts_saturate() {
        let half = u64::MAX / 2 + 1;
        let payload = LogPayload::decode(
            json!({
                "paths": {
                    "/repo/com.olaf.rereminder_1.apk": half,
                    "/repo/com.olaf.rereminder_2.apk": half
                }
            })
            .to_string()
            .as_bytes(),
        )
        .unwrap();

        let stat = payload.tally(&matcher());
        assert_eq!(stat.downloads, u64::MAX);
        assert_eq!(stat.versions.get("1"), Some(&half));
        assert_eq!(stat.versions.get("2"), Some(&half));
    }

    #[test]
    fn test_tally_package_keyed() {
        let payload = LogPayload::decode(
            br#"{"packages": {"com.olaf.rereminder": {"hits": 21}, "com.olaf.rereminder.pro": 3}}"#,
        )
        .unwrap();

        let stat = payload.tally(&matcher());
        assert_eq!(stat.downloads, 21);
        assert_eq!(stat.metadata_hits, 0);
        assert!(stat.versions.is_empty());
    }
}
