//! Canonical record types.
//!
//! This module provides the deduplicated, normalized representations used by
//! the rest of the application:
//! - [`EventRecord`]: a canonical calendar occurrence
//! - [`ReminderRecord`]: a canonical reminder
//!
//! Records are constructed fresh on every fetch and never mutated in place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::interval::Interval;

/// A canonical calendar occurrence.
///
/// This is the provider-agnostic event representation after normalization
/// and deduplication. `start < end` holds for every record a well-formed
/// provider produces; recurrences arrive already expanded into concrete
/// occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Provider-assigned identifier.
    pub id: String,
    /// The event title.
    pub title: String,
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends.
    pub end: DateTime<Utc>,
    /// Whether this is an all-day event.
    pub is_all_day: bool,
    /// The event location, if any.
    pub location: Option<String>,
    /// Free-form notes, if any.
    pub notes: Option<String>,
    /// The calendar this event belongs to.
    pub calendar_id: String,
    /// Human-readable name of that calendar.
    pub calendar_title: String,
    /// Stable cross-account identifier, when the provider supplies one.
    pub external_id: Option<String>,
    /// Whether the record came from a remote-synced account rather than a
    /// purely local calendar.
    pub is_remote_synced: bool,
}

impl EventRecord {
    /// Creates a new record with the required fields.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        calendar_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start,
            end,
            is_all_day: false,
            location: None,
            notes: None,
            calendar_id: calendar_id.into(),
            calendar_title: String::new(),
            external_id: None,
            is_remote_synced: false,
        }
    }

    /// Returns the duration of the event in minutes.
    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }

    /// Projects this record onto the busy-time model.
    ///
    /// Returns `None` for degenerate ranges so downstream interval algebra
    /// can assume every interval is positive.
    pub fn busy_interval(&self) -> Option<Interval> {
        (self.start < self.end).then(|| Interval::new(self.start, self.end))
    }

    /// Checks if the event overlaps the half-open range `[start, end)`.
    pub fn overlaps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.start < end && self.end > start
    }

    /// Builder method to mark as all-day.
    pub fn with_all_day(mut self, is_all_day: bool) -> Self {
        self.is_all_day = is_all_day;
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Builder method to set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder method to set the calendar title.
    pub fn with_calendar_title(mut self, title: impl Into<String>) -> Self {
        self.calendar_title = title.into();
        self
    }

    /// Builder method to set the external identifier.
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Builder method to mark the record as remote-synced.
    pub fn with_remote_synced(mut self, synced: bool) -> Self {
        self.is_remote_synced = synced;
        self
    }
}

/// A canonical reminder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderRecord {
    /// Provider-assigned identifier.
    pub id: String,
    /// The reminder title.
    pub title: String,
    /// When the reminder is due, if scheduled.
    pub due: Option<DateTime<Utc>>,
    /// Whether the reminder has been completed.
    pub completed: bool,
    /// The list this reminder belongs to.
    pub list_id: String,
    /// Human-readable name of that list.
    pub list_title: String,
}

impl ReminderRecord {
    /// Creates a new reminder record.
    pub fn new(id: impl Into<String>, title: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            due: None,
            completed: false,
            list_id: list_id.into(),
            list_title: String::new(),
        }
    }

    /// Builder method to set the due time.
    pub fn with_due(mut self, due: DateTime<Utc>) -> Self {
        self.due = Some(due);
        self
    }

    /// Builder method to mark completion.
    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = completed;
        self
    }

    /// Builder method to set the list title.
    pub fn with_list_title(mut self, title: impl Into<String>) -> Self {
        self.list_title = title.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, h, min, 0).unwrap()
    }

    fn sample_event() -> EventRecord {
        EventRecord::new("evt-123", "Team Standup", utc(10, 0), utc(10, 30), "work")
    }

    #[test]
    fn basic_creation() {
        let event = sample_event();
        assert_eq!(event.id, "evt-123");
        assert_eq!(event.title, "Team Standup");
        assert!(!event.is_all_day);
        assert!(!event.is_remote_synced);
        assert_eq!(event.duration_minutes(), 30);
    }

    #[test]
    fn builder_pattern() {
        let event = sample_event()
            .with_all_day(false)
            .with_location("Room 101")
            .with_notes("Weekly sync")
            .with_calendar_title("Work")
            .with_external_id("ical-uid-42")
            .with_remote_synced(true);

        assert_eq!(event.location, Some("Room 101".to_string()));
        assert_eq!(event.notes, Some("Weekly sync".to_string()));
        assert_eq!(event.calendar_title, "Work");
        assert_eq!(event.external_id, Some("ical-uid-42".to_string()));
        assert!(event.is_remote_synced);
    }

    #[test]
    fn busy_interval_rejects_degenerate_ranges() {
        let event = sample_event();
        let interval = event.busy_interval().unwrap();
        assert_eq!(interval.start, event.start);
        assert_eq!(interval.end, event.end);

        let empty = EventRecord::new("evt-0", "Instant", utc(10, 0), utc(10, 0), "work");
        assert!(empty.busy_interval().is_none());

        let inverted = EventRecord::new("evt-1", "Backwards", utc(11, 0), utc(10, 0), "work");
        assert!(inverted.busy_interval().is_none());
    }

    #[test]
    fn overlap_check() {
        let event = sample_event(); // 10:00-10:30
        assert!(event.overlaps(utc(10, 15), utc(11, 0)));
        assert!(event.overlaps(utc(9, 0), utc(10, 1)));
        assert!(!event.overlaps(utc(10, 30), utc(11, 0)));
        assert!(!event.overlaps(utc(9, 0), utc(10, 0)));
    }

    #[test]
    fn reminder_builder() {
        let reminder = ReminderRecord::new("rem-1", "Buy milk", "groceries")
            .with_due(utc(18, 0))
            .with_completed(false)
            .with_list_title("Groceries");

        assert_eq!(reminder.title, "Buy milk");
        assert_eq!(reminder.due, Some(utc(18, 0)));
        assert!(!reminder.completed);
        assert_eq!(reminder.list_title, "Groceries");
    }

    #[test]
    fn serde_roundtrip() {
        let event = sample_event().with_notes("agenda").with_external_id("uid-1");
        let json = serde_json::to_string(&event).unwrap();
        let parsed: EventRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);

        let reminder = ReminderRecord::new("rem-1", "Buy milk", "groceries").with_due(utc(18, 0));
        let json = serde_json::to_string(&reminder).unwrap();
        let parsed: ReminderRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(reminder, parsed);
    }
}
