//! CalendarStore trait definition.
//!
//! This module defines [`CalendarStore`], the abstraction over the external
//! calendar/reminder store (the platform event store, a sync daemon, a test
//! double). The store hands back raw, possibly duplicated, possibly unsorted
//! records; everything canonical happens on this side of the boundary.
//!
//! The backing provider is not safe for concurrent access from multiple
//! call sites, so every operation is funneled through one exclusive-access
//! boundary — the service layer serializes calls and awaits completion.

use std::future::Future;
use std::pin::Pin;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use freeslot_core::{AccessDomain, AuthorizationState, TimeWindow};

use crate::error::StoreResult;
use crate::raw_event::{RawEvent, RawReminder};

/// A boxed future for async trait methods.
///
/// Boxing keeps the trait object-safe, so the store handle can be injected
/// as `dyn CalendarStore` where needed.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Filter for reminder fetches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReminderFilter {
    /// Only fetch reminders from these lists.
    pub list_ids: Option<Vec<String>>,
    /// Whether completed reminders are included.
    pub include_completed: bool,
    /// Only fetch reminders due strictly before this instant.
    pub due_before: Option<DateTime<Utc>>,
}

impl ReminderFilter {
    /// Creates a filter with defaults (all lists, incomplete only).
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to restrict to specific lists.
    pub fn with_list_ids(mut self, ids: Vec<String>) -> Self {
        self.list_ids = Some(ids);
        self
    }

    /// Builder method to include completed reminders.
    pub fn with_completed_included(mut self, include: bool) -> Self {
        self.include_completed = include;
        self
    }

    /// Builder method to cap the due time.
    pub fn with_due_before(mut self, due_before: DateTime<Utc>) -> Self {
        self.due_before = Some(due_before);
        self
    }
}

/// Payload for creating an event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    /// The event title.
    pub title: String,
    /// When the event starts.
    pub start: DateTime<Utc>,
    /// When the event ends. Must be strictly after `start`; validated
    /// before the draft reaches the store.
    pub end: DateTime<Utc>,
    /// Free-form notes.
    pub notes: Option<String>,
    /// The event location.
    pub location: Option<String>,
    /// Target calendar; the store picks its default when absent.
    pub calendar_id: Option<String>,
}

impl EventDraft {
    /// Creates a draft with the required fields.
    pub fn new(title: impl Into<String>, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self {
            title: title.into(),
            start,
            end,
            notes: None,
            location: None,
            calendar_id: None,
        }
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

    /// Builder method to target a calendar.
    pub fn with_calendar_id(mut self, calendar_id: impl Into<String>) -> Self {
        self.calendar_id = Some(calendar_id.into());
        self
    }
}

/// Payload for updating an event. Absent fields are left untouched.
///
/// A schedule change always carries both bounds: validating a lone bound
/// would require a read-modify-write against the store, while a pair keeps
/// the `start < end` check local and total.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventPatch {
    /// New title, if changing.
    pub title: Option<String>,
    /// New `(start, end)` pair, if changing the schedule.
    pub schedule: Option<(DateTime<Utc>, DateTime<Utc>)>,
    /// New notes, if changing.
    pub notes: Option<String>,
    /// New location, if changing.
    pub location: Option<String>,
}

impl EventPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder method to change the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Builder method to change the schedule.
    pub fn with_schedule(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.schedule = Some((start, end));
        self
    }

    /// Builder method to change the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    /// Builder method to change the location.
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Returns true if the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.schedule.is_none()
            && self.notes.is_none()
            && self.location.is_none()
    }
}

/// The external calendar/reminder store.
///
/// Implementations wrap a concrete backend. They report authorization state
/// but do not enforce it — gating is the service layer's job, so a test
/// double can exercise both sides of the permission boundary.
pub trait CalendarStore: Send + Sync {
    /// Identifies the backing provider (for logs).
    fn name(&self) -> &str;

    /// Reports the platform permission state for a domain.
    ///
    /// Owned by the external permission system; callers re-derive the
    /// effective capability from this before every operation.
    fn authorization_state(&self, domain: AccessDomain) -> AuthorizationState;

    /// Fetches raw events overlapping the window.
    ///
    /// Results may be duplicated across accounts and arrive unsorted;
    /// recurrences are already expanded into concrete occurrences.
    fn fetch_events(&self, window: TimeWindow) -> BoxFuture<'_, StoreResult<Vec<RawEvent>>>;

    /// Fetches raw reminders matching the filter.
    ///
    /// The underlying provider call has no native timeout; callers wrap it
    /// in a time-bounded fetch.
    fn fetch_reminders(
        &self,
        filter: ReminderFilter,
    ) -> BoxFuture<'_, StoreResult<Vec<RawReminder>>>;

    /// Creates an event and returns the stored record.
    fn create_event(&self, draft: EventDraft) -> BoxFuture<'_, StoreResult<RawEvent>>;

    /// Applies a patch to an existing event and returns the updated record.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::StoreError::NotFound`] when the id does not
    /// resolve.
    fn update_event(&self, event_id: &str, patch: EventPatch)
    -> BoxFuture<'_, StoreResult<RawEvent>>;

    /// Deletes an event.
    ///
    /// # Errors
    ///
    /// Returns [`crate::error::StoreError::NotFound`] when the id does not
    /// resolve.
    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, StoreResult<()>>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 2, 5, h, min, 0).unwrap()
    }

    #[test]
    fn reminder_filter_builder() {
        let filter = ReminderFilter::new()
            .with_list_ids(vec!["groceries".to_string()])
            .with_completed_included(true)
            .with_due_before(utc(18, 0));

        assert_eq!(filter.list_ids.as_ref().unwrap().len(), 1);
        assert!(filter.include_completed);
        assert_eq!(filter.due_before, Some(utc(18, 0)));
    }

    #[test]
    fn event_draft_builder() {
        let draft = EventDraft::new("Planning", utc(10, 0), utc(11, 0))
            .with_notes("Q2 roadmap")
            .with_location("Room 3")
            .with_calendar_id("work");

        assert_eq!(draft.title, "Planning");
        assert_eq!(draft.notes, Some("Q2 roadmap".to_string()));
        assert_eq!(draft.calendar_id, Some("work".to_string()));
    }

    #[test]
    fn event_patch_builder() {
        let empty = EventPatch::new();
        assert!(empty.is_empty());

        let patch = EventPatch::new()
            .with_title("Planning (moved)")
            .with_schedule(utc(14, 0), utc(15, 0));

        assert!(!patch.is_empty());
        assert_eq!(patch.schedule, Some((utc(14, 0), utc(15, 0))));
    }

    #[test]
    fn serde_roundtrip() {
        let draft = EventDraft::new("Planning", utc(10, 0), utc(11, 0)).with_location("Room 3");
        let json = serde_json::to_string(&draft).unwrap();
        let parsed: EventDraft = serde_json::from_str(&json).unwrap();
        assert_eq!(draft, parsed);

        let patch = EventPatch::new().with_schedule(utc(14, 0), utc(15, 0));
        let json = serde_json::to_string(&patch).unwrap();
        let parsed: EventPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(patch, parsed);
    }
}
