//! External calendar/reminder store boundary: raw records, store trait, normalization

pub mod error;
pub mod memory;
pub mod normalize;
pub mod raw_event;
pub mod store;

pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use normalize::{
    normalize_event, normalize_events, normalize_reminder, normalize_reminders,
    UNTITLED_PLACEHOLDER,
};
pub use raw_event::{RawEvent, RawEventSource, RawReminder, RawTime};
pub use store::{BoxFuture, CalendarStore, EventDraft, EventPatch, ReminderFilter};
