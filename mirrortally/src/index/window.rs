//! Window selection over a mirror's log index.

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;

/// Canonical suffix of a log file name.
pub const LOG_SUFFIX: &str = ".json";

/// How many of a mirror's most recent logs to scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogWindow {
    /// The last N logs in index order (one log is roughly one week).
    Recent(usize),
    /// Every log the mirror lists.
    All,
}

impl Default for LogWindow {
    fn default() -> Self {
        // 12 weekly snapshots, about three months
        LogWindow::Recent(12)
    }
}

impl fmt::Display for LogWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogWindow::Recent(n) => write!(f, "{}", n),
            LogWindow::All => write!(f, "all"),
        }
    }
}

/// Error parsing a [`LogWindow`] from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid log window '{0}': expected a positive integer or 'all'")]
pub struct ParseWindowError(pub String);

impl FromStr for LogWindow {
    type Err = ParseWindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(LogWindow::All);
        }
        match trimmed.parse::<usize>() {
            Ok(n) if n > 0 => Ok(LogWindow::Recent(n)),
            _ => Err(ParseWindowError(s.to_string())),
        }
    }
}

/// Append the canonical `.json` suffix if it is absent.
pub fn normalize_log_name(identifier: &str) -> String {
    if identifier.ends_with(LOG_SUFFIX) {
        identifier.to_string()
    } else {
        format!("{}{}", identifier, LOG_SUFFIX)
    }
}

/// Select the log files to scan from a raw index listing.
///
/// Identifiers are normalized first so that `2024-01-01` and
/// `2024-01-01.json` collapse into one entry, then sorted ascending and
/// deduplicated. A window larger than the listing selects everything.
pub fn select_window(identifiers: &[String], window: LogWindow) -> Vec<String> {
    let mut names: Vec<String> = identifiers
        .iter()
        .map(|id| normalize_log_name(id))
        .collect();
    names.sort();
    names.dedup();

    match window {
        LogWindow::All => names,
        LogWindow::Recent(n) => {
            let start = names.len().saturating_sub(n);
            names.split_off(start)
        }
    }
}

fn date_identifier_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^\d{4}-\d{2}-\d{2}(\.json)?$").expect("date identifier pattern is valid")
    })
}

/// Identifiers that do not follow the fixed-width date encoding.
///
/// Lexicographic order of such identifiers is not guaranteed to be
/// chronological.
pub fn nonconforming_identifiers(identifiers: &[String]) -> Vec<&str> {
    let pattern = date_identifier_pattern();
    identifiers
        .iter()
        .map(String::as_str)
        .filter(|id| !pattern.is_match(id))
        .collect()
}
