//! Core types and algorithms: time windows, busy intervals, slot search, dedup

pub mod auth;
pub mod dedup;
pub mod event;
pub mod interval;
pub mod slot;
pub mod time;
pub mod tracing;

pub use auth::{AccessDomain, AuthorizationState, Capability};
pub use dedup::{completeness_score, dedup_key, dedupe_events};
pub use event::{EventRecord, ReminderRecord};
pub use interval::{merge_intervals, Interval};
pub use slot::{find_first_slot, Slot, SlotQuery, DEFAULT_STEP_MINUTES, MIN_STEP_MINUTES};
pub use time::{align_up_to_step, TimeWindow};
pub use tracing::{init_tracing, LogConfig, LogError, LogFormat};
