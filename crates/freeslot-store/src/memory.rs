//! In-memory store implementation.
//!
//! [`MemoryStore`] implements [`CalendarStore`] over hash maps. It is the
//! injectable test double for the service layer: authorization states are
//! configurable per domain, reminder fetches can be given an artificial
//! latency to exercise the time-bounded fetch path, and fetches can be made
//! to fail to exercise the soft-failure policy.
//!
//! The store reports its configured authorization states but does not
//! enforce them; gating happens in the service layer.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use freeslot_core::{AccessDomain, AuthorizationState, TimeWindow};

use crate::error::{StoreError, StoreResult};
use crate::raw_event::{RawEvent, RawReminder, RawTime};
use crate::store::{BoxFuture, CalendarStore, EventDraft, EventPatch, ReminderFilter};

/// Calendar id used when a draft does not target one.
const DEFAULT_CALENDAR_ID: &str = "default";

/// An in-memory calendar/reminder store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    events: Mutex<HashMap<String, RawEvent>>,
    reminders: Mutex<Vec<RawReminder>>,
    event_auth: AuthorizationState,
    reminder_auth: AuthorizationState,
    reminder_latency: Option<Duration>,
    fetch_failure: Option<String>,
    next_id: AtomicU64,
}

impl MemoryStore {
    /// Creates an empty store with full access to both domains.
    pub fn new() -> Self {
        Self {
            event_auth: AuthorizationState::FullAccess,
            reminder_auth: AuthorizationState::FullAccess,
            ..Self::default()
        }
    }

    /// Builder method to set the events authorization state.
    pub fn with_event_authorization(mut self, state: AuthorizationState) -> Self {
        self.event_auth = state;
        self
    }

    /// Builder method to set the reminders authorization state.
    pub fn with_reminder_authorization(mut self, state: AuthorizationState) -> Self {
        self.reminder_auth = state;
        self
    }

    /// Builder method to delay reminder fetches by `latency`.
    pub fn with_reminder_latency(mut self, latency: Duration) -> Self {
        self.reminder_latency = Some(latency);
        self
    }

    /// Builder method to make every fetch fail with the given message.
    pub fn with_fetch_failure(mut self, message: impl Into<String>) -> Self {
        self.fetch_failure = Some(message.into());
        self
    }

    /// Builder method to seed events.
    pub fn with_events(self, events: Vec<RawEvent>) -> Self {
        {
            let mut stored = self.events.lock().expect("events lock");
            for event in events {
                stored.insert(event.id.clone(), event);
            }
        }
        self
    }

    /// Builder method to seed reminders.
    pub fn with_reminders(self, reminders: Vec<RawReminder>) -> Self {
        *self.reminders.lock().expect("reminders lock") = reminders;
        self
    }

    /// Returns the number of stored events.
    pub fn event_count(&self) -> usize {
        self.events.lock().expect("events lock").len()
    }

    fn allocate_id(&self) -> String {
        format!("mem-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

impl CalendarStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn authorization_state(&self, domain: AccessDomain) -> AuthorizationState {
        match domain {
            AccessDomain::Events => self.event_auth,
            AccessDomain::Reminders => self.reminder_auth,
        }
    }

    fn fetch_events(&self, window: TimeWindow) -> BoxFuture<'_, StoreResult<Vec<RawEvent>>> {
        Box::pin(async move {
            if let Some(ref message) = self.fetch_failure {
                return Err(StoreError::Unknown(message.clone()));
            }
            let events = self.events.lock().expect("events lock");
            Ok(events
                .values()
                .filter(|event| window.overlaps(event.start.to_utc(), event.end.to_utc()))
                .cloned()
                .collect())
        })
    }

    fn fetch_reminders(
        &self,
        filter: ReminderFilter,
    ) -> BoxFuture<'_, StoreResult<Vec<RawReminder>>> {
        Box::pin(async move {
            if let Some(latency) = self.reminder_latency {
                tokio::time::sleep(latency).await;
            }
            if let Some(ref message) = self.fetch_failure {
                return Err(StoreError::Unknown(message.clone()));
            }
            let reminders = self.reminders.lock().expect("reminders lock");
            Ok(reminders
                .iter()
                .filter(|reminder| {
                    (filter.include_completed || !reminder.completed)
                        && filter
                            .list_ids
                            .as_ref()
                            .is_none_or(|ids| ids.iter().any(|id| id == &reminder.list_id))
                        && filter
                            .due_before
                            .is_none_or(|cap| reminder.due.is_some_and(|due| due < cap))
                })
                .cloned()
                .collect())
        })
    }

    fn create_event(&self, draft: EventDraft) -> BoxFuture<'_, StoreResult<RawEvent>> {
        Box::pin(async move {
            let calendar_id = draft
                .calendar_id
                .unwrap_or_else(|| DEFAULT_CALENDAR_ID.to_string());
            let mut event = RawEvent::new(
                self.allocate_id(),
                RawTime::from_datetime(draft.start),
                RawTime::from_datetime(draft.end),
                calendar_id,
            )
            .with_summary(draft.title);
            if let Some(notes) = draft.notes {
                event = event.with_notes(notes);
            }
            if let Some(location) = draft.location {
                event = event.with_location(location);
            }

            self.events
                .lock()
                .expect("events lock")
                .insert(event.id.clone(), event.clone());
            Ok(event)
        })
    }

    fn update_event(
        &self,
        event_id: &str,
        patch: EventPatch,
    ) -> BoxFuture<'_, StoreResult<RawEvent>> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            let mut events = self.events.lock().expect("events lock");
            let event = events
                .get_mut(&event_id)
                .ok_or_else(|| StoreError::NotFound(event_id.clone()))?;

            if let Some(title) = patch.title {
                event.summary = Some(title);
            }
            if let Some((start, end)) = patch.schedule {
                event.start = RawTime::from_datetime(start);
                event.end = RawTime::from_datetime(end);
            }
            if let Some(notes) = patch.notes {
                event.notes = Some(notes);
            }
            if let Some(location) = patch.location {
                event.location = Some(location);
            }
            Ok(event.clone())
        })
    }

    fn delete_event(&self, event_id: &str) -> BoxFuture<'_, StoreResult<()>> {
        let event_id = event_id.to_string();
        Box::pin(async move {
            self.events
                .lock()
                .expect("events lock")
                .remove(&event_id)
                .map(|_| ())
                .ok_or(StoreError::NotFound(event_id))
        })
    }
}
