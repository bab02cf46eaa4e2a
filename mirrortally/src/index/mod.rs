//! Log index resolution.
//!
//! Each mirror publishes an `index.json` listing its log snapshots. The
//! resolver fetches it and selects the window of log files to scan.
//!
//! # Ordering precondition
//!
//! Log identifiers are ordered as plain strings. This is only chronological
//! when identifiers use a fixed-width date encoding (`YYYY-MM-DD`, optionally
//! with a `.json` suffix). Identifiers that do not follow it are reported with
//! a warning but still ordered lexicographically.

mod resolver;
mod window;

pub use resolver::{IndexError, IndexResolver};
pub use window::{
    nonconforming_identifiers, normalize_log_name, select_window, LogWindow, ParseWindowError,
    LOG_SUFFIX,
};
