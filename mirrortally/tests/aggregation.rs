//! End-to-end aggregation tests against an in-memory metrics host.
//!
//! Run with: `cargo test --test aggregation`

use std::collections::HashMap;
use std::fs;

use proptest::prelude::*;

use mirrortally::badge::{write_badge, BadgeDescriptor, NumberFormat};
use mirrortally::config::TallyConfig;
use mirrortally::index::LogWindow;
use mirrortally::source::{FetchError, HttpClient};
use mirrortally::tally;

// ============================================================================
// Helper Functions
// ============================================================================

const BASE: &str = "https://fdroid.gitlab.io/metrics/";
const PACKAGE: &str = "com.olaf.rereminder";

/// Metrics host serving fixed documents; unknown URLs answer 404.
#[derive(Default)]
struct FixtureHost {
    documents: HashMap<String, Result<String, FetchError>>,
}

impl FixtureHost {
    fn index(mut self, mirror: &str, files: &[&str]) -> Self {
        let body = serde_json::to_string(files).unwrap();
        self.documents
            .insert(format!("{}{}/index.json", BASE, mirror), Ok(body));
        self
    }

    fn log(mut self, mirror: &str, file: &str, body: &str) -> Self {
        self.documents
            .insert(format!("{}{}/{}", BASE, mirror, file), Ok(body.to_string()));
        self
    }

    fn failing_index(mut self, mirror: &str, status: u16) -> Self {
        let url = format!("{}{}/index.json", BASE, mirror);
        self.documents
            .insert(url.clone(), Err(FetchError::Status { url, status }));
        self
    }
}

impl HttpClient for FixtureHost {
    fn get(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        match self.documents.get(url) {
            Some(Ok(body)) => Ok(body.clone().into_bytes()),
            Some(Err(e)) => Err(e.clone()),
            None => Err(FetchError::NotFound {
                url: url.to_string(),
            }),
        }
    }
}

fn downloads_log(version: &str, hits: u64) -> String {
    format!(
        r#"{{"hits": 1000, "paths": {{"/repo/{}_{}.apk": {}, "/repo/org.other.app_1.apk": 500, "/api/v1/packages/{}": 3}}}}"#,
        PACKAGE, version, hits, PACKAGE
    )
}

fn config(mirrors: &[&str]) -> TallyConfig {
    TallyConfig::default().with_mirrors(mirrors.iter().copied())
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_resilience_scenario() {
    // Mirror A has no index; mirror B has one malformed and one good log.
    let host = FixtureHost::default()
        .index("b", &["2024-01-01.json", "2024-01-08.json"])
        .log("b", "2024-01-01.json", "{\"paths\": {")
        .log("b", "2024-01-08.json", &downloads_log("102", 42));

    let result = tally(&config(&["a", "b"]), &host);

    assert_eq!(result.total_downloads(), 42);
    assert_eq!(result.total_metadata_hits(), 3);
    assert_eq!(result.logs_unreadable(), 1);
}

#[test]
fn test_empty_scenario_still_writes_badge() {
    let host = FixtureHost::default().index("a", &[]).index("b", &[]);
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("fdroid-shield.json");
    let config = config(&["a", "b"]).with_output(&output);

    let result = tally(&config, &host);
    let badge = BadgeDescriptor::from_result(&result, &config.badge.style);
    write_badge(&config.badge.output, &badge).unwrap();

    let written: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(written["schemaVersion"], 1);
    assert_eq!(written["message"], "0");
}

#[test]
fn test_every_mirror_unreachable_is_zero() {
    let host = FixtureHost::default()
        .failing_index("a", 502)
        .failing_index("b", 500);

    let result = tally(&config(&["a", "b"]), &host);
    assert_eq!(result.total_downloads(), 0);
}

#[test]
fn test_sum_across_mirrors_and_versions() {
    let host = FixtureHost::default()
        .index("a", &["2024-01-01", "2024-01-08"])
        .log("a", "2024-01-01.json", &downloads_log("101", 10))
        .log("a", "2024-01-08.json", &downloads_log("102", 20))
        .index("b", &["2024-01-08"])
        .log("b", "2024-01-08.json", &downloads_log("102", 5));

    let result = tally(&config(&["a", "b"]), &host);

    assert_eq!(result.total_downloads(), 35);
    assert_eq!(result.total_metadata_hits(), 9);
    assert_eq!(result.versions().get("101"), Some(&10));
    assert_eq!(result.versions().get("102"), Some(&25));
    assert_eq!(result.mirrors[0].stat.downloads, 30);
    assert_eq!(result.mirrors[1].stat.downloads, 5);
}

#[test]
fn test_idempotent_totals() {
    let host = FixtureHost::default()
        .index("a", &["2024-01-01"])
        .log("a", "2024-01-01.json", &downloads_log("7", 13));
    let config = config(&["a"]);

    let first = tally(&config, &host);
    let second = tally(&config, &host);

    assert_eq!(first.total_downloads(), second.total_downloads());
    assert_eq!(first.mirrors, second.mirrors);
}

#[test]
fn test_parallel_config_matches_sequential() {
    let host = FixtureHost::default()
        .index("a", &["2024-01-01"])
        .log("a", "2024-01-01.json", &downloads_log("1", 4))
        .index("b", &["2024-01-01"])
        .log("b", "2024-01-01.json", &downloads_log("1", 6));

    let sequential = tally(&config(&["a", "b"]), &host);
    let parallel = tally(&config(&["a", "b"]).with_parallel(true), &host);

    assert_eq!(parallel.total_downloads(), 10);
    assert_eq!(parallel.mirrors, sequential.mirrors);
}

#[test]
fn test_grouped_badge_message() {
    let host = FixtureHost::default()
        .index("a", &["2024-01-01"])
        .log("a", "2024-01-01.json", &downloads_log("1", 1_342));
    let mut config = config(&["a"]);
    config.badge.style.number_format = NumberFormat::Grouped { separator: '.' };

    let result = tally(&config, &host);
    let badge = BadgeDescriptor::from_result(&result, &config.badge.style);

    assert_eq!(badge.message, "1.342");
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Widening the window over readable logs never lowers the total.
    #[test]
    fn prop_window_is_monotonic(
        hits in prop::collection::vec(0u64..10_000, 1..20),
        narrow in 1usize..20,
        extra in 0usize..20,
    ) {
        let names: Vec<String> = (0..hits.len())
            .map(|i| format!("2024-{:02}-01.json", i + 1))
            .collect();
        let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

        let mut host = FixtureHost::default().index("a", &name_refs);
        for (name, h) in names.iter().zip(&hits) {
            host = host.log("a", name, &downloads_log("1", *h));
        }

        let small = tally(&config(&["a"]).with_window(LogWindow::Recent(narrow)), &host);
        let large = tally(&config(&["a"]).with_window(LogWindow::Recent(narrow + extra)), &host);
        let all = tally(&config(&["a"]).with_window(LogWindow::All), &host);

        prop_assert!(small.total_downloads() <= large.total_downloads());
        prop_assert!(large.total_downloads() <= all.total_downloads());
        prop_assert_eq!(all.total_downloads(), hits.iter().sum::<u64>());
    }
}
