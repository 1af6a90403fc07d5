use chrono::{DateTime, TimeZone, Utc};

/// Milliseconds in one hour, the resolution every forecast product is keyed on.
pub const MILLIS_PER_HOUR: i64 = 3_600_000;

/// A single logical timestamp (millisecond epoch) representing what the UI
/// currently wants displayed. The time-dimension control mutates it, the
/// overlay controller reads it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeCursor(i64);

impl TimeCursor {
    pub fn from_millis(millis: i64) -> Self {
        TimeCursor(millis)
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    pub fn datetime(self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0).single()
    }

    /// Hour-truncated key (`YYYY-MM-DDTHH`), the 13-char ISO prefix used both
    /// as the request key for vector data and as the cycle path segment.
    pub fn hour_key(self) -> String {
        self.datetime()
            .map(|dt| dt.format("%Y-%m-%dT%H").to_string())
            .unwrap_or_default()
    }

    /// Whole hours between `start` and this cursor. Negative if the cursor
    /// sits before the cycle start.
    pub fn hours_since(self, start: DateTime<Utc>) -> i64 {
        (self.0 - start.timestamp_millis()) / MILLIS_PER_HOUR
    }
}

impl From<DateTime<Utc>> for TimeCursor {
    fn from(dt: DateTime<Utc>) -> Self {
        TimeCursor(dt.timestamp_millis())
    }
}

impl std::fmt::Display for TimeCursor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.datetime() {
            Some(dt) => write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%SZ")),
            None => write!(f, "{}ms", self.0),
        }
    }
}
