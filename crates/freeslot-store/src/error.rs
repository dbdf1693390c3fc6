//! Error types for store operations.

use std::time::Duration;

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors surfaced by the calendar/reminder store boundary.
///
/// Read paths in the service layer convert these into empty results (soft
/// failure, logged); write paths propagate them, since the caller must know
/// whether the mutation took effect.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The capability check failed for the requested operation.
    #[error("not authorized: {0}")]
    NotAuthorized(String),

    /// The identifier does not resolve in the store.
    #[error("not found: {0}")]
    NotFound(String),

    /// A mutation carried an empty or inverted time range.
    #[error("invalid date range: start {start} is not before end {end}")]
    InvalidDateRange {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A time-bounded fetch exceeded its limit.
    #[error("fetch timed out after {limit:?}")]
    Timeout { limit: Duration },

    /// Unclassified provider failure.
    #[error("store failure: {0}")]
    Unknown(String),
}

impl StoreError {
    /// Returns a stable machine-readable code for this error, for logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::NotAuthorized(_) => "not_authorized",
            Self::NotFound(_) => "not_found",
            Self::InvalidDateRange { .. } => "invalid_date_range",
            Self::Timeout { .. } => "timeout",
            Self::Unknown(_) => "unknown",
        }
    }

    /// True for failures a caller may reasonably retry. Nothing in this
    /// core retries automatically; the decision belongs to the caller.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Timeout { .. } | Self::Unknown(_))
    }
}
