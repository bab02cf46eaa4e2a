//! Aggregation across mirrors.
//!
//! # Architecture
//!
//! ```text
//! Aggregator::run
//!         │
//!         ├── ScanStrategy (trait)
//!         │       ├── SequentialScan   one request at a time
//!         │       └── ParallelScan     one thread per mirror, joined in order
//!         │
//!         └── Aggregator::scan_mirror  (per mirror)
//!                 ├── IndexResolver    log window
//!                 └── LogExtractor     PackageStat per log
//! ```
//!
//! Each mirror produces an independent [`MirrorSummary`]; grand totals are
//! folded from the summaries in [`AggregateResult::from_summaries`] only
//! after every mirror has finished.

mod orchestrator;
mod result;
mod strategy;

pub use orchestrator::Aggregator;
pub use result::{AggregateResult, MirrorStatus, MirrorSummary};
pub use strategy::{ParallelScan, ScanStrategy, SequentialScan};
