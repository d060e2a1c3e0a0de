//! Clock port for stamping status changes.

use chrono::{DateTime, Utc};

/// Source of the timestamp recorded with each status change.
///
/// Callers pass a clock into status mutations so that histories built in
/// tests, or replayed from another system, carry predictable times.
pub trait Clock: Send + Sync {
    /// Returns the current UTC time.
    fn now(&self) -> DateTime<Utc>;
}
