//! Time utilities for Quantis RNG.

use chrono::{DateTime, SecondsFormat, Utc};

/// Current UTC time as an RFC 3339 string with second precision.
pub fn now_rfc3339() -> String {
    to_rfc3339(Utc::now())
}

/// Format a UTC timestamp as RFC 3339 with second precision.
pub fn to_rfc3339(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Secs, true)
}
