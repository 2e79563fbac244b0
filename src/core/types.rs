use chrono::{DateTime, Utc};

/// Ordinal key of a lifecycle-managed row.
pub type EntityId = i64;

/// Identifier of the user acting on a command.
pub type UserId = i64;

/// Audit timestamps are always UTC.
pub type Timestamp = DateTime<Utc>;

/// Current time used for every audit stamp.
#[inline]
pub fn now() -> Timestamp {
    Utc::now()
}
