//! Earliest-free-slot search.
//!
//! [`find_first_slot`] performs a greedy first-fit scan over merged busy
//! intervals: candidates advance on a step grid anchored at the Unix epoch,
//! and the first candidate range no busy interval overlaps wins. This is
//! deliberately not an optimal packing search; it answers "find me a meeting
//! slot", not dense multi-slot bin-packing.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::interval::Interval;
use crate::time::align_up_to_step;

/// Default candidate step, in minutes.
pub const DEFAULT_STEP_MINUTES: i64 = 15;

/// Smallest accepted candidate step, in minutes. Requested steps below this
/// are floored.
pub const MIN_STEP_MINUTES: i64 = 5;

/// Parameters for a free-slot search. Transient, constructed per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotQuery {
    /// Start of the search window (inclusive).
    pub window_start: DateTime<Utc>,
    /// End of the search window (exclusive).
    pub window_end: DateTime<Utc>,
    /// Required slot length, in minutes. Must be positive.
    pub duration_minutes: i64,
    /// Candidate grid granularity, in minutes.
    pub step_minutes: i64,
}

impl SlotQuery {
    /// Creates a query with the default step.
    pub fn new(window_start: DateTime<Utc>, window_end: DateTime<Utc>, duration_minutes: i64) -> Self {
        Self {
            window_start,
            window_end,
            duration_minutes,
            step_minutes: DEFAULT_STEP_MINUTES,
        }
    }

    /// Builder method to set the candidate step.
    pub fn with_step_minutes(mut self, step_minutes: i64) -> Self {
        self.step_minutes = step_minutes;
        self
    }

    /// The requested duration.
    pub fn duration(&self) -> Duration {
        Duration::minutes(self.duration_minutes)
    }

    /// The effective step: the requested step floored at
    /// [`MIN_STEP_MINUTES`].
    pub fn effective_step(&self) -> Duration {
        Duration::minutes(self.step_minutes.max(MIN_STEP_MINUTES))
    }

    /// True when the window is non-empty and the duration positive.
    fn is_satisfiable(&self) -> bool {
        self.window_start < self.window_end && self.duration_minutes > 0
    }
}

/// A free slot. Spans exactly the queried duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// When the slot begins.
    pub start: DateTime<Utc>,
    /// When the slot ends.
    pub end: DateTime<Utc>,
}

/// Finds the earliest free slot of the queried duration.
///
/// `busy` must already be merged and sorted (see
/// [`crate::interval::merge_intervals`], whose output satisfies both).
/// Returns `None` when the query window or duration is degenerate, or when
/// no aligned candidate of the full duration fits — soft failure, matching
/// the read policy of the rest of the core.
///
/// Each blocked candidate jumps to the step boundary at or after the
/// blocking interval's end (and at least one step forward), so the loop is
/// bounded by `window / step + busy.len()` iterations.
pub fn find_first_slot(busy: &[Interval], query: &SlotQuery) -> Option<Slot> {
    if !query.is_satisfiable() {
        return None;
    }

    let step = query.effective_step();
    let duration = query.duration();
    let mut candidate = align_up_to_step(query.window_start, step);

    while candidate + duration <= query.window_end {
        let candidate_end = candidate + duration;
        match busy
            .iter()
            .find(|b| b.overlaps_range(candidate, candidate_end))
        {
            None => {
                trace!(start = %candidate, end = %candidate_end, "found free slot");
                return Some(Slot {
                    start: candidate,
                    end: candidate_end,
                });
            }
            Some(blocking) => {
                candidate = align_up_to_step(blocking.end.max(candidate + step), step);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, h, min, 0).unwrap()
    }

    fn iv(start: DateTime<Utc>, end: DateTime<Utc>) -> Interval {
        Interval::new(start, end)
    }

    #[test]
    fn first_slot_after_busy_block() {
        let busy = vec![iv(utc(9, 0), utc(10, 0))];
        let query = SlotQuery::new(utc(9, 0), utc(12, 0), 30);

        let slot = find_first_slot(&busy, &query).unwrap();
        assert_eq!(slot.start, utc(10, 0));
        assert_eq!(slot.end, utc(10, 30));
    }

    #[test]
    fn free_window_yields_slot_at_window_start() {
        let query = SlotQuery::new(utc(9, 0), utc(12, 0), 45);
        let slot = find_first_slot(&[], &query).unwrap();
        assert_eq!(slot.start, utc(9, 0));
        assert_eq!(slot.end, utc(9, 45));
    }

    #[test]
    fn fully_busy_window_yields_none() {
        let busy = vec![iv(utc(9, 0), utc(17, 0))];
        let query = SlotQuery::new(utc(9, 0), utc(17, 0), 15);
        assert!(find_first_slot(&busy, &query).is_none());

        let tiny = SlotQuery::new(utc(9, 0), utc(17, 0), 1).with_step_minutes(5);
        assert!(find_first_slot(&busy, &tiny).is_none());
    }

    #[test]
    fn unaligned_window_start_snaps_to_grid() {
        let query = SlotQuery::new(utc(9, 7), utc(12, 0), 30);
        let slot = find_first_slot(&[], &query).unwrap();
        assert_eq!(slot.start, utc(9, 15));
    }

    #[test]
    fn step_is_floored_at_five_minutes() {
        let query = SlotQuery::new(utc(9, 1), utc(12, 0), 30).with_step_minutes(1);
        assert_eq!(query.effective_step(), Duration::minutes(5));

        let slot = find_first_slot(&[], &query).unwrap();
        assert_eq!(slot.start, utc(9, 5));
    }

    #[test]
    fn partial_overlap_blocks_candidate() {
        // Busy [9:20, 9:40) overlaps a 9:15 candidate of 30 minutes.
        let busy = vec![iv(utc(9, 20), utc(9, 40))];
        let query = SlotQuery::new(utc(9, 15), utc(12, 0), 30);

        let slot = find_first_slot(&busy, &query).unwrap();
        assert_eq!(slot.start, utc(9, 45));
    }

    #[test]
    fn candidate_jumps_past_blocking_interval() {
        // A long busy block is skipped in one advance, not step by step.
        let busy = vec![iv(utc(9, 0), utc(11, 55))];
        let query = SlotQuery::new(utc(9, 0), utc(13, 0), 30);

        let slot = find_first_slot(&busy, &query).unwrap();
        assert_eq!(slot.start, utc(12, 0));
    }

    #[test]
    fn slot_may_exactly_fill_the_window_tail() {
        let busy = vec![iv(utc(9, 0), utc(11, 30))];
        let query = SlotQuery::new(utc(9, 0), utc(12, 0), 30);

        let slot = find_first_slot(&busy, &query).unwrap();
        assert_eq!(slot.start, utc(11, 30));
        assert_eq!(slot.end, utc(12, 0));
    }

    #[test]
    fn gap_between_busy_blocks_is_found() {
        let busy = vec![iv(utc(9, 0), utc(10, 0)), iv(utc(10, 30), utc(12, 0))];
        let query = SlotQuery::new(utc(9, 0), utc(12, 0), 30);

        let slot = find_first_slot(&busy, &query).unwrap();
        assert_eq!(slot.start, utc(10, 0));

        // A 45-minute request does not fit the 30-minute gap.
        let longer = SlotQuery::new(utc(9, 0), utc(13, 0), 45);
        let slot = find_first_slot(&busy, &longer).unwrap();
        assert_eq!(slot.start, utc(12, 0));
    }

    #[test]
    fn degenerate_queries_yield_none() {
        // Inverted window
        let inverted = SlotQuery::new(utc(12, 0), utc(9, 0), 30);
        assert!(find_first_slot(&[], &inverted).is_none());

        // Empty window
        let empty = SlotQuery::new(utc(9, 0), utc(9, 0), 30);
        assert!(find_first_slot(&[], &empty).is_none());

        // Non-positive duration
        let zero = SlotQuery::new(utc(9, 0), utc(12, 0), 0);
        assert!(find_first_slot(&[], &zero).is_none());
        let negative = SlotQuery::new(utc(9, 0), utc(12, 0), -30);
        assert!(find_first_slot(&[], &negative).is_none());
    }

    #[test]
    fn duration_longer_than_window_yields_none() {
        let query = SlotQuery::new(utc(9, 0), utc(10, 0), 90);
        assert!(find_first_slot(&[], &query).is_none());
    }

    #[test]
    fn serde_roundtrip() {
        let query = SlotQuery::new(utc(9, 0), utc(12, 0), 30).with_step_minutes(10);
        let json = serde_json::to_string(&query).unwrap();
        let parsed: SlotQuery = serde_json::from_str(&json).unwrap();
        assert_eq!(query, parsed);
    }
}
