//! MirrorTally - download counts from F-Droid mirror access logs
//!
//! This library sums the downloads of one package over the weekly access-log
//! snapshots that F-Droid mirrors publish, and renders the total as a
//! shields.io endpoint badge.
//!
//! # Example
//!
//! ```ignore
//! use mirrortally::aggregate::Aggregator;
//! use mirrortally::badge::{write_badge, BadgeDescriptor};
//! use mirrortally::config::TallyConfig;
//! use mirrortally::source::ReqwestClient;
//!
//! let config = TallyConfig::default();
//! let client = ReqwestClient::with_timeout(config.source.timeout)?;
//!
//! let result = Aggregator::new(&client, config.matcher())
//!     .with_endpoints(config.endpoints())
//!     .with_window(config.package.window)
//!     .run(&config.source.mirrors);
//!
//! let badge = BadgeDescriptor::from_result(&result, &config.badge.style);
//! write_badge(&config.badge.output, &badge)?;
//! ```

pub mod aggregate;
pub mod badge;
pub mod config;
pub mod extract;
pub mod index;
pub mod source;

use aggregate::{AggregateResult, Aggregator, ParallelScan};
use config::TallyConfig;
use source::HttpClient;

/// Run an aggregation as described by `config`.
pub fn tally(config: &TallyConfig, client: &dyn HttpClient) -> AggregateResult {
    let mut aggregator = Aggregator::new(client, config.matcher())
        .with_endpoints(config.endpoints())
        .with_window(config.package.window);
    if config.source.parallel {
        aggregator =
            aggregator.with_strategy(Box::new(ParallelScan::new(config.source.mirrors.len())));
    }
    aggregator.run(&config.source.mirrors)
}
