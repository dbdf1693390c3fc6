//! Busy-interval algebra.
//!
//! An [`Interval`] is a pure busy time range: it carries no identity back to
//! the event(s) that produced it. [`merge_intervals`] reduces any collection
//! of busy ranges to the minimal sorted non-overlapping set covering the
//! same instants.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A busy time range with `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    /// When the busy range begins (inclusive).
    pub start: DateTime<Utc>,
    /// When the busy range ends (exclusive).
    pub end: DateTime<Utc>,
}

impl Interval {
    /// Creates a new interval. Callers uphold the `start < end` invariant;
    /// zero or negative ranges are rejected where intervals are built from
    /// event records.
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Returns the span of this interval.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if two intervals share any instant (half-open semantics, so
    /// touching intervals do not overlap).
    pub fn overlaps(&self, other: &Interval) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Checks if this interval overlaps the half-open range `[start, end)`.
    pub fn overlaps_range(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }
}

/// Merges busy intervals into a minimal sorted non-overlapping set.
///
/// Input does not need to be pre-sorted; a stable sort by start runs first,
/// so equal starts keep their input order. Touching intervals are absorbed
/// into one block: a meeting ending at 10:00 and another starting at 10:00
/// produce a single busy range. Every input must satisfy `start < end`.
pub fn merge_intervals(mut intervals: Vec<Interval>) -> Vec<Interval> {
    if intervals.is_empty() {
        return intervals;
    }

    intervals.sort_by_key(|interval| interval.start);

    let mut merged = Vec::with_capacity(intervals.len());
    let mut current = intervals[0];
    for interval in intervals.into_iter().skip(1) {
        if interval.start <= current.end {
            current.end = current.end.max(interval.end);
        } else {
            merged.push(current);
            current = interval;
        }
    }
    merged.push(current);
    merged
}
