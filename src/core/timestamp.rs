//! Timestamp formatting for `log_timestamp`
//!
//! Every variant renders an ISO 8601 compatible string, as ingest pipelines
//! expect a textual timestamp in the record.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use chunked_event_logger::core::TimestampFormat;
/// use chrono::Utc;
///
/// let timestamp = TimestampFormat::Iso8601.format(&Utc::now());
/// assert!(timestamp.ends_with('Z'));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimestampFormat {
    /// ISO 8601 with milliseconds: `2025-01-08T10:30:45.123Z`
    #[default]
    Iso8601,

    /// ISO 8601 with microseconds: `2025-01-08T10:30:45.123456Z`
    Iso8601Micros,

    /// RFC 3339 with explicit offset: `2025-01-08T10:30:45.123+00:00`
    Rfc3339,
}

impl TimestampFormat {
    /// Format a `DateTime<Utc>` according to this format
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Utc>) -> String {
        match self {
            TimestampFormat::Iso8601 => datetime.to_rfc3339_opts(SecondsFormat::Millis, true),
            TimestampFormat::Iso8601Micros => {
                datetime.to_rfc3339_opts(SecondsFormat::Micros, true)
            }
            TimestampFormat::Rfc3339 => datetime.to_rfc3339_opts(SecondsFormat::Millis, false),
        }
    }

    /// Current time in this format
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Utc::now())
    }
}
