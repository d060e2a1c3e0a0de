//! Clock frozen at a chosen instant.

use chrono::{DateTime, Utc};

use crate::ports::clock::Clock;

/// Returns the same instant on every call.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// Parses an RFC 3339 timestamp.
    ///
    /// # Errors
    ///
    /// Returns an error string if `timestamp` is not valid RFC 3339.
    pub fn parse(timestamp: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(timestamp)
            .map(|t| Self(t.with_timezone(&Utc)))
            .map_err(|e| format!("Invalid timestamp '{timestamp}': {e}"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}
