//! Soft-fail read results.
//!
//! Read paths never propagate provider failures: missing permission or a
//! backend error degrades to an empty value, so the embedding UI keeps
//! rendering. [`ReadOutcome`] carries the status alongside the value, so
//! callers that care can still tell "empty by policy" apart from "genuinely
//! no data".

use serde::{Deserialize, Serialize};

/// Why a read produced the value it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadStatus {
    /// The read completed against the store.
    Ok,
    /// The capability check failed; the value is empty by policy.
    Unauthorized,
    /// The store reported a failure; the value is empty.
    StoreFailed,
    /// The fetch exceeded its time limit; the value is empty.
    TimedOut,
}

/// The value of a soft-failing read plus the status explaining it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadOutcome<T> {
    /// The fetched value; empty when the status is degraded.
    pub value: T,
    /// Why the value looks the way it does.
    pub status: ReadStatus,
}

impl<T> ReadOutcome<T> {
    /// Wraps a successful read.
    pub fn ok(value: T) -> Self {
        Self {
            value,
            status: ReadStatus::Ok,
        }
    }

    /// True when the value is empty for a reason other than the data.
    pub fn is_degraded(&self) -> bool {
        self.status != ReadStatus::Ok
    }
}

impl<T: Default> ReadOutcome<T> {
    /// An empty outcome for a read blocked by the capability check.
    pub fn unauthorized() -> Self {
        Self {
            value: T::default(),
            status: ReadStatus::Unauthorized,
        }
    }

    /// An empty outcome for a read the store failed to serve.
    pub fn store_failed() -> Self {
        Self {
            value: T::default(),
            status: ReadStatus::StoreFailed,
        }
    }

    /// An empty outcome for a read that exceeded its time limit.
    pub fn timed_out() -> Self {
        Self {
            value: T::default(),
            status: ReadStatus::TimedOut,
        }
    }
}
