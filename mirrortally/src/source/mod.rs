//! Read-only access to the published mirror metrics.
//!
//! The metrics host exposes, per mirror, an index of dated log files and the
//! log files themselves as JSON documents:
//!
//! ```text
//! <base_url><mirror>/index.json          ["2024-01-01.json", "2024-01-08.json", ...]
//! <base_url><mirror>/<log-file-name>     {"paths": {"/repo/<pkg>_<ver>.apk": 12, ...}}
//! ```
//!
//! Everything that talks to the network goes through the [`HttpClient`] trait
//! so that the resolver, extractor and orchestrator can be driven by fixtures
//! in tests.

mod endpoints;
mod error;
mod http;

pub use endpoints::{MirrorEndpoints, DEFAULT_BASE_URL, INDEX_FILENAME};
pub use error::FetchError;
pub use http::{HttpClient, ReqwestClient, DEFAULT_TIMEOUT_SECS};

#[cfg(test)]
pub(crate) use http::tests;
