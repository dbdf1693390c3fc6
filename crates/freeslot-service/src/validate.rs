//! Mutation validation.
//!
//! One rule guards every create and every schedule-touching update: the
//! start must be strictly before the end. Equal or inverted bounds never
//! reach the external store.

use chrono::{DateTime, Utc};

use freeslot_store::{StoreError, StoreResult};

/// Rejects empty or inverted event ranges.
pub fn validate_event_range(start: DateTime<Utc>, end: DateTime<Utc>) -> StoreResult<()> {
    if start < end {
        Ok(())
    } else {
        Err(StoreError::InvalidDateRange { start, end })
    }
}
