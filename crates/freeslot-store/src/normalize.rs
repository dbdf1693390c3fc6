//! Raw record to canonical record conversion.
//!
//! The normalization step is pure field mapping with no failure mode:
//! provider data is assumed well-formed, and the only repair applied is the
//! `"Untitled"` placeholder for records with a missing or blank title.
//! All-day dates expand to `[midnight, midnight)` UTC bounds, with the end
//! date treated as exclusive per the provider convention.

use freeslot_core::{EventRecord, ReminderRecord};

use crate::raw_event::{RawEvent, RawEventSource, RawReminder};

/// Title used when a provider record has no usable summary.
pub const UNTITLED_PLACEHOLDER: &str = "Untitled";

/// Converts a raw event into a canonical [`EventRecord`].
pub fn normalize_event(raw: &RawEvent) -> EventRecord {
    let mut event = EventRecord::new(
        &raw.id,
        raw.effective_title(),
        raw.start.to_utc(),
        raw.end.to_utc(),
        &raw.calendar_id,
    )
    .with_all_day(raw.is_all_day())
    .with_calendar_title(&raw.calendar_title)
    .with_remote_synced(raw.source == RawEventSource::RemoteSynced);

    if let Some(ref location) = raw.location {
        event = event.with_location(location);
    }
    if let Some(ref notes) = raw.notes {
        event = event.with_notes(notes);
    }
    if let Some(ref external_id) = raw.external_id {
        event = event.with_external_id(external_id);
    }

    event
}

/// Batch-normalizes raw events, dropping cancelled occurrences.
pub fn normalize_events(raw_events: &[RawEvent]) -> Vec<EventRecord> {
    raw_events
        .iter()
        .filter(|raw| !raw.is_cancelled())
        .map(normalize_event)
        .collect()
}

/// Converts a raw reminder into a canonical [`ReminderRecord`].
pub fn normalize_reminder(raw: &RawReminder) -> ReminderRecord {
    let mut reminder = ReminderRecord::new(&raw.id, raw.effective_title(), &raw.list_id)
        .with_completed(raw.completed)
        .with_list_title(&raw.list_title);

    if let Some(due) = raw.due {
        reminder = reminder.with_due(due);
    }

    reminder
}

/// Batch-normalizes raw reminders.
pub fn normalize_reminders(raw_reminders: &[RawReminder]) -> Vec<ReminderRecord> {
    raw_reminders.iter().map(normalize_reminder).collect()
}
