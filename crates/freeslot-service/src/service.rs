//! The calendar service façade.
//!
//! [`CalendarService`] is the boundary the application layer talks to. It
//! owns the injected store handle behind a mutex — the backing provider is
//! not safe for concurrent access, so every store call funnels through this
//! one exclusive-access boundary and callers await completion. Before every
//! operation the effective capability is re-derived from the store's
//! reported authorization state.
//!
//! Failure policy: read paths degrade to empty results (logged, never
//! surfaced as errors), write paths propagate errors, and nothing retries
//! automatically.

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::{debug, warn};

use freeslot_core::{
    AccessDomain, Capability, EventRecord, Interval, ReminderRecord, Slot, SlotQuery, TimeWindow,
    dedupe_events, find_first_slot, merge_intervals,
};
use freeslot_store::{
    CalendarStore, EventDraft, EventPatch, ReminderFilter, StoreError, StoreResult,
    normalize_event, normalize_events, normalize_reminders,
};

use crate::config::ServiceConfig;
use crate::outcome::ReadOutcome;
use crate::timeout::fetch_with_timeout;
use crate::validate::validate_event_range;

/// The calendar scheduling service.
///
/// Generic over the store so tests inject
/// [`freeslot_store::MemoryStore`] and production code injects the real
/// provider handle.
pub struct CalendarService<S> {
    store: Mutex<S>,
    config: ServiceConfig,
}

impl<S: CalendarStore> CalendarService<S> {
    /// Creates a service with the default configuration.
    pub fn new(store: S) -> Self {
        Self::with_config(store, ServiceConfig::default())
    }

    /// Creates a service with an explicit configuration.
    pub fn with_config(store: S, config: ServiceConfig) -> Self {
        Self {
            store: Mutex::new(store),
            config,
        }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// The effective capability for a domain, derived from the store's
    /// current authorization state.
    pub async fn capability(&self, domain: AccessDomain) -> Capability {
        let store = self.store.lock().await;
        capability_of(&*store, domain)
    }

    /// Canonical events overlapping `[start, end)`.
    ///
    /// Normalized, deduplicated, and sorted by start (ties broken by id so
    /// the order is deterministic). Degrades to an empty outcome when the
    /// capability check fails or the store errors.
    pub async fn events_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReadOutcome<Vec<EventRecord>> {
        let store = self.store.lock().await;
        if !capability_of(&*store, AccessDomain::Events).allows_read() {
            debug!("calendar read not authorized, returning empty");
            return ReadOutcome::unauthorized();
        }

        match store.fetch_events(TimeWindow::new(start, end)).await {
            Ok(raw) => {
                let mut events = dedupe_events(normalize_events(&raw));
                events.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
                debug!(fetched = raw.len(), kept = events.len(), "fetched calendar events");
                ReadOutcome::ok(events)
            }
            Err(error) => {
                warn!(code = error.code(), error = %error, "event fetch failed, returning empty");
                ReadOutcome::store_failed()
            }
        }
    }

    /// Merged busy intervals overlapping `[start, end)`.
    ///
    /// The minimal sorted non-overlapping set covering every occupied
    /// instant in the range.
    pub async fn busy_between(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> ReadOutcome<Vec<Interval>> {
        let events = self.events_between(start, end).await;
        ReadOutcome {
            value: merge_intervals(self.busy_intervals(&events.value)),
            status: events.status,
        }
    }

    /// Finds the earliest free slot satisfying the query.
    ///
    /// Returns `None` for degenerate queries, when no slot of the requested
    /// duration exists at the step granularity, or when the busy model
    /// could not be read (a slot offered against an unreadable calendar
    /// could double-book).
    pub async fn find_first_available_slot(&self, query: &SlotQuery) -> Option<Slot> {
        let busy = self.busy_between(query.window_start, query.window_end).await;
        if busy.is_degraded() {
            debug!(status = ?busy.status, "busy model unavailable, no slot offered");
            return None;
        }
        find_first_slot(&busy.value, query)
    }

    /// Reminders matching the filter.
    ///
    /// The fetch is raced against the configured time limit; a timeout
    /// degrades to an empty outcome rather than an error.
    pub async fn reminders(&self, filter: ReminderFilter) -> ReadOutcome<Vec<ReminderRecord>> {
        let store = self.store.lock().await;
        if !capability_of(&*store, AccessDomain::Reminders).allows_read() {
            debug!("reminder read not authorized, returning empty");
            return ReadOutcome::unauthorized();
        }

        let limit = self.config.reminder_fetch_limit;
        match fetch_with_timeout(store.fetch_reminders(filter), limit).await {
            Ok(raw) => ReadOutcome::ok(normalize_reminders(&raw)),
            Err(StoreError::Timeout { .. }) => {
                warn!(
                    limit_ms = limit.as_millis() as u64,
                    "reminder fetch timed out, returning empty"
                );
                ReadOutcome::timed_out()
            }
            Err(error) => {
                warn!(code = error.code(), error = %error, "reminder fetch failed, returning empty");
                ReadOutcome::store_failed()
            }
        }
    }

    /// Creates a calendar event.
    ///
    /// # Errors
    ///
    /// [`StoreError::NotAuthorized`] without write access,
    /// [`StoreError::InvalidDateRange`] for an empty or inverted range, and
    /// whatever the store reports for the mutation itself.
    pub async fn create_event(&self, draft: EventDraft) -> StoreResult<EventRecord> {
        let store = self.store.lock().await;
        require_write(&*store)?;
        validate_event_range(draft.start, draft.end)?;

        let stored = store.create_event(draft).await?;
        debug!(id = %stored.id, "created calendar event");
        Ok(normalize_event(&stored))
    }

    /// Applies a patch to an existing event.
    ///
    /// A schedule change is validated before it reaches the store; other
    /// fields pass through untouched.
    pub async fn update_event(&self, event_id: &str, patch: EventPatch) -> StoreResult<EventRecord> {
        let store = self.store.lock().await;
        require_write(&*store)?;
        if let Some((start, end)) = patch.schedule {
            validate_event_range(start, end)?;
        }

        let stored = store.update_event(event_id, patch).await?;
        debug!(id = %stored.id, "updated calendar event");
        Ok(normalize_event(&stored))
    }

    /// Deletes an event.
    pub async fn delete_event(&self, event_id: &str) -> StoreResult<()> {
        let store = self.store.lock().await;
        require_write(&*store)?;

        store.delete_event(event_id).await?;
        debug!(id = event_id, "deleted calendar event");
        Ok(())
    }

    fn busy_intervals(&self, events: &[EventRecord]) -> Vec<Interval> {
        events
            .iter()
            .filter(|event| self.config.treat_all_day_as_busy || !event.is_all_day)
            .filter_map(EventRecord::busy_interval)
            .collect()
    }
}

fn capability_of<S: CalendarStore>(store: &S, domain: AccessDomain) -> Capability {
    Capability::from_state(store.authorization_state(domain))
}

fn require_write<S: CalendarStore>(store: &S) -> StoreResult<()> {
    let capability = capability_of(store, AccessDomain::Events);
    if capability.allows_write() {
        Ok(())
    } else {
        Err(StoreError::NotAuthorized(format!(
            "event writes require write access, capability is {}",
            capability.as_str()
        )))
    }
}
