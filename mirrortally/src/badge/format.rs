//! Rendering of counts as badge messages.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// How a count is rendered in the badge message.
///
/// Both modes are order-preserving: a larger count never renders as a
/// smaller label value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NumberFormat {
    /// `999`, `1.5k`, `2.3M` (one decimal).
    #[default]
    Compact,
    /// Exact integer with thousands separators, e.g. `1.342` with `.`.
    Grouped { separator: char },
}

impl NumberFormat {
    /// Render a count.
    pub fn format(&self, value: u64) -> String {
        match self {
            NumberFormat::Compact => format_compact(value),
            NumberFormat::Grouped { separator } => format_grouped(value, *separator),
        }
    }
}

impl fmt::Display for NumberFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NumberFormat::Compact => write!(f, "compact"),
            NumberFormat::Grouped { separator } => write!(f, "grouped ('{}')", separator),
        }
    }
}

/// Error parsing a [`NumberFormat`] name.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown number format '{0}': expected 'compact' or 'grouped'")]
pub struct ParseNumberFormatError(pub String);

impl FromStr for NumberFormat {
    type Err = ParseNumberFormatError;

    /// Parses `compact` or `grouped`; grouped defaults to a `.` separator.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(NumberFormat::Compact),
            "grouped" => Ok(NumberFormat::Grouped { separator: '.' }),
            _ => Err(ParseNumberFormatError(s.to_string())),
        }
    }
}

fn format_compact(value: u64) -> String {
    if value >= 1_000_000 {
        format!("{:.1}M", value as f64 / 1_000_000.0)
    } else if value >= 1_000 {
        format!("{:.1}k", value as f64 / 1_000.0)
    } else {
        value.to_string()
    }
}

fn format_grouped(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
