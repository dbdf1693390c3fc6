//! Duplicate collapse for canonical event records.
//!
//! Multiple calendar accounts frequently mirror the same meeting; a naive
//! display would show it two or three times. Records are grouped under a
//! composite key and the most complete member of each group survives.
//!
//! External-identifier matching is authoritative when the provider supplies
//! one. The fallback composite key is a heuristic: two genuinely distinct
//! same-titled same-time events will over-merge, and the same event with
//! slightly different titles will under-merge. Both are accepted limitations
//! of the key, not defects in the collapse.

use std::collections::HashMap;

use tracing::debug;

use crate::event::EventRecord;

/// Derives the grouping key for a record.
///
/// Timestamps are truncated to the minute before keying, so two mirrors of
/// the same meeting whose start times drifted by a few seconds still land in
/// the same group. Records sharing an external identifier and truncated
/// start/end always share a key, regardless of title or location; without an
/// external identifier the key falls back to normalized title, the truncated
/// times, and normalized location.
pub fn dedup_key(event: &EventRecord) -> String {
    let start_minute = event.start.timestamp().div_euclid(60);
    let end_minute = event.end.timestamp().div_euclid(60);

    match event.external_id.as_deref().filter(|id| !id.trim().is_empty()) {
        Some(external_id) => format!("external|{external_id}|{start_minute}|{end_minute}"),
        None => format!(
            "fallback|{}|{start_minute}|{end_minute}|{}",
            normalize_component(&event.title),
            normalize_component(event.location.as_deref().unwrap_or("")),
        ),
    }
}

/// Trim plus lowercase. Inner whitespace is preserved; collapsing it would
/// widen the over-merge failure mode of an already heuristic key.
fn normalize_component(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Scores how complete a record is.
///
/// Notes outweigh location, and records from remote-synced accounts outrank
/// purely local mirrors of the same meeting.
pub fn completeness_score(event: &EventRecord) -> u32 {
    let mut score = 0;
    if event.notes.as_deref().is_some_and(|n| !n.trim().is_empty()) {
        score += 2;
    }
    if event
        .location
        .as_deref()
        .is_some_and(|l| !l.trim().is_empty())
    {
        score += 1;
    }
    if event.is_remote_synced {
        score += 1;
    }
    score
}

/// Collapses duplicate records, keeping the highest-scoring member of each
/// key group.
///
/// On a score tie the record seen first in input order survives: an entry is
/// only replaced by a strictly greater score. Output order is unspecified
/// (the result is a set projected back to a sequence); callers sort.
pub fn dedupe_events(events: Vec<EventRecord>) -> Vec<EventRecord> {
    let total = events.len();
    let mut best: HashMap<String, EventRecord> = HashMap::with_capacity(total);

    for event in events {
        let key = dedup_key(&event);
        let replaces_existing = match best.get(&key) {
            Some(existing) => completeness_score(&event) > completeness_score(existing),
            None => true,
        };
        if replaces_existing {
            best.insert(key, event);
        }
    }

    if best.len() < total {
        debug!(input = total, kept = best.len(), "collapsed duplicate events");
    }
    best.into_values().collect()
}
