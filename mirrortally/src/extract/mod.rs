//! Per-log download extraction.
//!
//! A log snapshot maps request paths to hit counts. Two path families are
//! credited to the target package:
//!
//! ```text
//! /repo/<package>_<version>.apk[&query]   -> download of one build
//! /api/v1/packages/<package>              -> metadata lookup, not a download
//! ```
//!
//! Extraction of one log is a pure value ([`PackageStat`]); folding across
//! logs and mirrors happens in [`crate::aggregate`].

mod error;
mod extractor;
mod matcher;
mod payload;
mod stat;

pub use error::ExtractError;
pub use extractor::LogExtractor;
pub use matcher::{Credit, PackageMatcher, DEFAULT_API_PREFIX, DEFAULT_REPO_PREFIX};
pub use payload::{hit_count, LogPayload};
pub use stat::PackageStat;
