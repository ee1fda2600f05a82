//! Debounce policy shared by autosave and history snapshots.

use std::time::Duration;

/// When a pending change should be flushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebouncePolicy {
    /// Whether flushing is enabled at all.
    pub enabled: bool,

    /// Quiet period after the last change before flushing.
    /// Additional changes reset the timer.
    pub debounce: Duration,

    /// Maximum delay before forcing a flush.
    ///
    /// If changes keep coming, flush after this long since the first
    /// unflushed change.
    pub max_delay: Duration,
}

impl Default for DebouncePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            debounce: Duration::from_millis(500),
            max_delay: Duration::from_secs(30),
        }
    }
}

impl DebouncePolicy {
    pub fn new(debounce: Duration) -> Self {
        Self {
            debounce,
            ..Default::default()
        }
    }

    /// A policy that never flushes.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Check if a flush should trigger given the time since the last change
    /// and the time since the first unflushed change.
    pub fn should_flush(&self, since_last_change: Duration, since_first_unsaved: Duration) -> bool {
        if !self.enabled {
            return false;
        }

        // Quiet period elapsed
        if since_last_change >= self.debounce {
            return true;
        }

        // Continuous editing: force a flush
        since_first_unsaved >= self.max_delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_default_policy() {
        let policy = DebouncePolicy::default();
        assert!(policy.enabled);
        assert_eq!(policy.debounce, ms(500));
    }

    #[test]
    fn test_should_flush_disabled() {
        let policy = DebouncePolicy::disabled();
        assert!(!policy.should_flush(ms(10_000), ms(60_000)));
    }

    #[test]
    fn test_should_flush_debounce() {
        let policy = DebouncePolicy::default();
        assert!(!policy.should_flush(ms(100), ms(100)));
        assert!(policy.should_flush(ms(500), ms(800)));
    }

    #[test]
    fn test_should_flush_max_delay() {
        let policy = DebouncePolicy::default();
        assert!(!policy.should_flush(ms(100), ms(25_000)));
        assert!(policy.should_flush(ms(100), ms(35_000)));
    }
}
