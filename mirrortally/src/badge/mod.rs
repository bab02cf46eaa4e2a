//! Badge descriptor output.
//!
//! The run's only artifact is a shields.io "endpoint" JSON document:
//!
//! ```json
//! {
//!   "schemaVersion": 1,
//!   "label": "F-Droid Downloads",
//!   "message": "1.5k",
//!   "color": "blue",
//!   "cacheSeconds": 86400,
//!   "lastUpdated": "2024-01-08 06:00 UTC"
//! }
//! ```

mod descriptor;
mod error;
mod format;
mod writer;

pub use descriptor::{BadgeDescriptor, BadgeStyle, SCHEMA_VERSION};
pub use error::BadgeError;
pub use format::{NumberFormat, ParseNumberFormatError};
pub use writer::write_badge;
