//! Application façade: gated reads and writes, slot search, time-bounded fetches

pub mod config;
pub mod outcome;
pub mod service;
pub mod timeout;
pub mod validate;

pub use config::ServiceConfig;
pub use outcome::{ReadOutcome, ReadStatus};
pub use service::CalendarService;
pub use timeout::fetch_with_timeout;
pub use validate::validate_event_range;
