//! Dirty state tracking with debounce.

use super::DebouncePolicy;
use std::time::Duration;

/// Tracks unflushed changes.
///
/// Two states: idle (clean) and pending (dirty). Times are clock readings
/// supplied by the caller, see [`Clock`](crate::Clock).
#[derive(Debug, Clone, Default)]
pub struct DirtyTracker {
    /// Whether there are unflushed changes.
    dirty: bool,

    /// When the most recent change was made.
    last_change: Option<Duration>,

    /// When the first unflushed change was made. Reset on flush.
    first_unsaved_change: Option<Duration>,

    /// Whether a flush is currently in progress.
    saving: bool,
}

impl DirtyTracker {
    /// Create a new tracker with no pending changes.
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    #[inline]
    pub fn is_saving(&self) -> bool {
        self.saving
    }

    /// Record a change at `now`, restarting the quiet period.
    pub fn mark_dirty(&mut self, now: Duration) {
        self.dirty = true;
        self.last_change = Some(now);

        // Only set first_unsaved_change if this is the first change since last flush
        if self.first_unsaved_change.is_none() {
            self.first_unsaved_change = Some(now);
        }
    }

    pub fn start_save(&mut self) {
        self.saving = true;
    }

    pub fn save_complete(&mut self) {
        self.dirty = false;
        self.saving = false;
        self.first_unsaved_change = None;
    }

    /// Keep the changes pending and restart the quiet period.
    pub fn save_failed(&mut self, now: Duration) {
        self.saving = false;
        self.last_change = Some(now);
    }

    pub fn since_last_change(&self, now: Duration) -> Option<Duration> {
        self.last_change.map(|t| now.saturating_sub(t))
    }

    pub fn since_first_unsaved(&self, now: Duration) -> Option<Duration> {
        self.first_unsaved_change.map(|t| now.saturating_sub(t))
    }

    /// Whether pending changes should be flushed at `now`.
    pub fn should_flush(&self, now: Duration, policy: &DebouncePolicy) -> bool {
        if !self.dirty || self.saving {
            return false;
        }

        match (self.since_last_change(now), self.since_first_unsaved(now)) {
            (Some(since_last), Some(since_first)) => policy.should_flush(since_last, since_first),
            _ => false,
        }
    }
}
