//! Service configuration.

use std::time::Duration;

/// Tuning knobs for the calendar service.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Time limit for reminder fetches. The underlying provider call has no
    /// native timeout, so the service races it against this limit.
    pub reminder_fetch_limit: Duration,
    /// Whether all-day records occupy time in the busy model. Off by
    /// default: an all-day marker spanning the query window would otherwise
    /// make every slot search come back empty.
    pub treat_all_day_as_busy: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            reminder_fetch_limit: Duration::from_secs(5),
            treat_all_day_as_busy: false,
        }
    }
}

impl ServiceConfig {
    /// Creates a config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: set the reminder fetch limit.
    pub fn with_reminder_fetch_limit(mut self, limit: Duration) -> Self {
        self.reminder_fetch_limit = limit;
        self
    }

    /// Builder: treat all-day records as busy time.
    pub fn with_all_day_busy(mut self, busy: bool) -> Self {
        self.treat_all_day_as_busy = busy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ServiceConfig::default();
        assert_eq!(config.reminder_fetch_limit, Duration::from_secs(5));
        assert!(!config.treat_all_day_as_busy);
    }

    #[test]
    fn builder_methods() {
        let config = ServiceConfig::new()
            .with_reminder_fetch_limit(Duration::from_millis(500))
            .with_all_day_busy(true);

        assert_eq!(config.reminder_fetch_limit, Duration::from_millis(500));
        assert!(config.treat_all_day_as_busy);
    }
}
