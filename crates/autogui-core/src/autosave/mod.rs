//! Debounced autosave.
//!
//! Provides:
//! - `DirtyTracker` - idle/pending state machine with debounce
//! - `DebouncePolicy` - quiet period and forced-flush settings
//! - `AutosaveRegistry` - one timer per save path
//!
//! The render-side entry point is [`Renderer::autosave`](crate::Renderer::autosave).

mod policy;
mod tracker;

pub use policy::DebouncePolicy;
pub use tracker::DirtyTracker;

use crate::storage::Storage;
use crate::value::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Autosave state for one save path.
#[derive(Debug, Clone, Default)]
pub struct AutosaveTimer {
    tracker: DirtyTracker,
    loaded: bool,
    saves: u64,
}

impl AutosaveTimer {
    pub fn is_pending(&self) -> bool {
        self.tracker.is_dirty()
    }

    /// Number of successful saves so far.
    pub fn saves(&self) -> u64 {
        self.saves
    }
}

/// Process-wide autosave timers keyed by save path.
#[derive(Debug, Default)]
pub struct AutosaveRegistry {
    timers: HashMap<PathBuf, AutosaveTimer>,
}

impl AutosaveRegistry {
    pub fn timer(&self, path: &Path) -> Option<&AutosaveTimer> {
        self.timers.get(path)
    }

    /// Scope entry: on first use of `path`, replace `value` with the stored
    /// state, if there is one.
    pub fn enter(&mut self, path: &Path, value: &mut Value, storage: &mut dyn Storage) {
        let timer = self.timers.entry(path.to_path_buf()).or_default();
        if timer.loaded {
            return;
        }
        timer.loaded = true;
        match storage.load(path) {
            Ok(Some(stored)) => {
                tracing::info!("Restored autosaved state from {}", path.display());
                *value = stored;
            }
            Ok(None) => {
                tracing::debug!("No autosaved state at {}", path.display());
            }
            Err(e) => {
                tracing::warn!("Failed to load autosaved state: {}, keeping current", e);
            }
        }
    }

    /// Scope exit: note a modification and flush once the policy allows.
    /// Returns whether a save happened.
    pub fn exit(
        &mut self,
        path: &Path,
        modified: bool,
        now: Duration,
        policy: &DebouncePolicy,
        value: &Value,
        storage: &mut dyn Storage,
    ) -> bool {
        let timer = self.timers.entry(path.to_path_buf()).or_default();
        if modified {
            timer.tracker.mark_dirty(now);
        }
        if !timer.tracker.should_flush(now, policy) {
            return false;
        }

        timer.tracker.start_save();
        match storage.save(value, path) {
            Ok(()) => {
                timer.tracker.save_complete();
                timer.saves += 1;
                true
            }
            Err(e) => {
                tracing::error!("Autosave to {} failed: {}", path.display(), e.user_message());
                timer.tracker.save_failed(now);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn ms(ms: u64) -> Duration {
        Duration::from_millis(ms)
    }

    #[test]
    fn test_first_enter_loads_stored_state() {
        let path = Path::new("state.json");
        let mut storage = MemoryStorage::new();
        storage.insert(path, Value::int(7));
        let mut registry = AutosaveRegistry::default();

        let mut value = Value::int(1);
        registry.enter(path, &mut value, &mut storage);
        assert_eq!(value, Value::int(7));

        let mut value = Value::int(2);
        registry.enter(path, &mut value, &mut storage);
        assert_eq!(value, Value::int(2));
    }

    #[test]
    fn test_exit_saves_after_quiet_period() {
        let path = Path::new("state.json");
        let policy = DebouncePolicy::default();
        let mut storage = MemoryStorage::new();
        let mut registry = AutosaveRegistry::default();
        let value = Value::int(3);

        assert!(!registry.exit(path, true, ms(0), &policy, &value, &mut storage));
        assert!(registry.timer(path).unwrap().is_pending());
        assert!(!registry.exit(path, false, ms(499), &policy, &value, &mut storage));
        assert!(registry.exit(path, false, ms(500), &policy, &value, &mut storage));
        assert!(!registry.exit(path, false, ms(900), &policy, &value, &mut storage));

        assert_eq!(storage.save_count(), 1);
        assert_eq!(storage.get(path), Some(&Value::int(3)));
    }
}
