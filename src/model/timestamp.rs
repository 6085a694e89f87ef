//! Timestamp wrapper that tolerates malformed input.
//!
//! Wire timestamps are RFC 3339 strings. The raw string is retained and
//! parsing happens at the point of comparison, so a malformed value never
//! fails a load - it degrades to a deterministic fallback ordering in the
//! engine instead.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in time carried as its raw wire string.
///
/// Equality and hashing are on the raw string. Ordering is deliberately
/// not implemented here; comparison semantics (including the malformed
/// fallback) live in the engine's comparators.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(String);

impl Timestamp {
    /// Wrap a raw timestamp string. Never fails; malformed input is a
    /// boundary case handled at comparison time.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Current wall-clock time in UTC, formatted as RFC 3339.
    pub fn now() -> Self {
        Self(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    /// Parse the raw string as an instant. `None` for malformed values.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.0)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }

    /// Borrow the raw wire string.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
