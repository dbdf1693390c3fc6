//! Time primitives for the scheduling core.
//!
//! This module provides [`TimeWindow`], the half-open `[start, end)` range
//! used for event fetches and slot queries, and [`align_up_to_step`], which
//! rounds instants up onto a step grid anchored at the Unix epoch so that
//! successive queries with the same step produce comparable candidates
//! regardless of where their windows start.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// A half-open time range `[start, end)` in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Start of the window (inclusive).
    pub start: DateTime<Utc>,
    /// End of the window (exclusive).
    pub end: DateTime<Utc>,
}

impl TimeWindow {
    /// Creates a new time window.
    ///
    /// The bounds are stored as given; callers that need a non-empty window
    /// check [`TimeWindow::is_valid`].
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Creates a time window from a start time and duration.
    pub fn from_duration(start: DateTime<Utc>, duration: Duration) -> Self {
        Self::new(start, start + duration)
    }

    /// Returns true if the window spans a positive amount of time.
    pub fn is_valid(&self) -> bool {
        self.start < self.end
    }

    /// Returns the duration of this window.
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Checks if an instant falls within this window.
    ///
    /// Uses half-open interval semantics: `[start, end)`.
    pub fn contains(&self, dt: DateTime<Utc>) -> bool {
        self.start <= dt && dt < self.end
    }

    /// Checks if the half-open range `[start, end)` overlaps this window.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        start < self.end && end > self.start
    }
}

/// Rounds `t` up to the next multiple of `step` counted from the Unix epoch.
///
/// An instant already on the grid is returned unchanged; anything else moves
/// forward, never backward. The grid anchor is fixed, not derived from any
/// particular window, so `align_up_to_step(t, step)` is a pure function of
/// its arguments. Euclidean division keeps pre-epoch instants rounding
/// toward later times.
pub fn align_up_to_step(t: DateTime<Utc>, step: Duration) -> DateTime<Utc> {
    let step_secs = step.num_seconds().max(1);
    let ts = t.timestamp();
    let mut aligned = ts.div_euclid(step_secs) * step_secs;
    if aligned < ts || (aligned == ts && t.timestamp_subsec_nanos() > 0) {
        aligned += step_secs;
    }
    DateTime::from_timestamp(aligned, 0).expect("aligned timestamp in range")
}
