//! Raw records from the external calendar/reminder store.
//!
//! This module defines [`RawEvent`] and [`RawReminder`], provider-shaped
//! representations of store data before normalization. Raw records preserve
//! the fields the provider hands back — duplicated meetings, blank titles,
//! cancelled occurrences and all — and are converted to the canonical types
//! in [`crate::normalize`].

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// The time specification of a raw event.
///
/// Providers return either a concrete instant or, for all-day events, a
/// bare date. All-day end dates are exclusive, per the usual provider
/// convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum RawTime {
    /// A specific instant in UTC.
    DateTime(DateTime<Utc>),
    /// An all-day event date (no specific time).
    Date(NaiveDate),
}

impl RawTime {
    /// Creates a `RawTime` from a UTC instant.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self::DateTime(dt)
    }

    /// Creates a `RawTime` from a date (all-day event).
    pub fn from_date(date: NaiveDate) -> Self {
        Self::Date(date)
    }

    /// Returns true if this is an all-day time.
    pub fn is_all_day(&self) -> bool {
        matches!(self, Self::Date(_))
    }

    /// Converts to a UTC instant. Dates map to midnight UTC.
    pub fn to_utc(&self) -> DateTime<Utc> {
        match self {
            Self::DateTime(dt) => *dt,
            Self::Date(date) => date.and_hms_opt(0, 0, 0).expect("valid time").and_utc(),
        }
    }
}

/// Which kind of account a raw record came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawEventSource {
    /// A calendar stored only on this device.
    #[default]
    Local,
    /// A calendar mirrored from a remote account (CalDAV, Exchange, ...).
    RemoteSynced,
}

/// A raw calendar event as returned by the store.
///
/// Possibly one of several mirrors of the same real-world meeting; the
/// deduplicator decides which mirror survives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEvent {
    /// Provider-assigned identifier.
    pub id: String,
    /// When the event starts.
    pub start: RawTime,
    /// When the event ends.
    pub end: RawTime,
    /// The event title, if the provider has one.
    pub summary: Option<String>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// The event location.
    pub location: Option<String>,
    /// The calendar this event belongs to.
    pub calendar_id: String,
    /// Human-readable name of that calendar.
    pub calendar_title: String,
    /// Stable cross-account identifier, when the provider supplies one.
    pub external_id: Option<String>,
    /// Which kind of account the record came from.
    pub source: RawEventSource,
    /// Provider status string (e.g. "confirmed", "cancelled").
    pub status: Option<String>,
}

impl RawEvent {
    /// Creates a new raw event with the minimum required fields.
    pub fn new(
        id: impl Into<String>,
        start: RawTime,
        end: RawTime,
        calendar_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            summary: None,
            notes: None,
            location: None,
            calendar_id: calendar_id.into(),
            calendar_title: String::new(),
            external_id: None,
            source: RawEventSource::Local,
            status: None,
        }
    }

    /// Returns the effective title, falling back to `"Untitled"` when the
    /// summary is missing or blank.
    pub fn effective_title(&self) -> &str {
        self.summary
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(crate::normalize::UNTITLED_PLACEHOLDER)
    }

    /// Returns true if the provider marked the event cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.status
            .as_deref()
            .is_some_and(|s| s.eq_ignore_ascii_case("cancelled"))
    }

    /// Returns true if this is an all-day event.
    pub fn is_all_day(&self) -> bool {
        self.start.is_all_day()
    }

    /// Builder method to set the summary.
    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    /// Builder method to set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder method to set the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
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

    /// Builder method to set the source kind.
    pub fn with_source(mut self, source: RawEventSource) -> Self {
        self.source = source;
        self
    }

    /// Builder method to set the provider status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }
}

/// A raw reminder as returned by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReminder {
    /// Provider-assigned identifier.
    pub id: String,
    /// The reminder title, if the provider has one.
    pub title: Option<String>,
    /// When the reminder is due, if scheduled.
    pub due: Option<DateTime<Utc>>,
    /// Whether the reminder has been completed.
    pub completed: bool,
    /// The list this reminder belongs to.
    pub list_id: String,
    /// Human-readable name of that list.
    pub list_title: String,
}

impl RawReminder {
    /// Creates a new raw reminder.
    pub fn new(id: impl Into<String>, list_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            due: None,
            completed: false,
            list_id: list_id.into(),
            list_title: String::new(),
        }
    }

    /// Returns the effective title, falling back to `"Untitled"`.
    pub fn effective_title(&self) -> &str {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(crate::normalize::UNTITLED_PLACEHOLDER)
    }

    /// Builder method to set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
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

    fn sample_datetime() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, 10, 0, 0).unwrap()
    }

    fn sample_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 2, 5).unwrap()
    }

    #[test]
    fn raw_time_variants() {
        let dt = RawTime::from_datetime(sample_datetime());
        assert!(!dt.is_all_day());
        assert_eq!(dt.to_utc(), sample_datetime());

        let date = RawTime::from_date(sample_date());
        assert!(date.is_all_day());
        assert_eq!(
            date.to_utc(),
            Utc.with_ymd_and_hms(2025, 2, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn raw_event_builder() {
        let event = RawEvent::new(
            "evt-123",
            RawTime::from_datetime(sample_datetime()),
            RawTime::from_datetime(sample_datetime()),
            "work",
        )
        .with_summary("Team Meeting")
        .with_notes("Weekly sync")
        .with_location("Room 101")
        .with_calendar_title("Work")
        .with_external_id("ical-uid-42")
        .with_source(RawEventSource::RemoteSynced);

        assert_eq!(event.effective_title(), "Team Meeting");
        assert_eq!(event.notes, Some("Weekly sync".to_string()));
        assert_eq!(event.calendar_title, "Work");
        assert_eq!(event.source, RawEventSource::RemoteSynced);
        assert!(!event.is_cancelled());
    }

    #[test]
    fn blank_summary_falls_back_to_untitled() {
        let start = RawTime::from_datetime(sample_datetime());
        let end = RawTime::from_datetime(sample_datetime());
        let missing = RawEvent::new("evt-1", start, end, "work");
        assert_eq!(missing.effective_title(), "Untitled");

        let blank = RawEvent::new("evt-2", start, end, "work").with_summary("   ");
        assert_eq!(blank.effective_title(), "Untitled");
    }

    #[test]
    fn cancelled_detection_is_case_insensitive() {
        let start = RawTime::from_datetime(sample_datetime());
        let end = RawTime::from_datetime(sample_datetime());
        let event = RawEvent::new("evt-1", start, end, "work").with_status("Cancelled");
        assert!(event.is_cancelled());

        let confirmed = RawEvent::new("evt-2", start, end, "work").with_status("confirmed");
        assert!(!confirmed.is_cancelled());
    }

    #[test]
    fn raw_reminder_builder() {
        let reminder = RawReminder::new("rem-1", "groceries")
            .with_title("Buy milk")
            .with_due(sample_datetime())
            .with_list_title("Groceries");

        assert_eq!(reminder.effective_title(), "Buy milk");
        assert_eq!(reminder.due, Some(sample_datetime()));
        assert!(!reminder.completed);

        let untitled = RawReminder::new("rem-2", "groceries");
        assert_eq!(untitled.effective_title(), "Untitled");
    }

    #[test]
    fn serde_roundtrip() {
        let event = RawEvent::new(
            "evt-123",
            RawTime::from_datetime(sample_datetime()),
            RawTime::from_date(sample_date()),
            "work",
        )
        .with_summary("Test Event")
        .with_source(RawEventSource::RemoteSynced);

        let json = serde_json::to_string(&event).unwrap();
        let parsed: RawEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, parsed);
    }
}
