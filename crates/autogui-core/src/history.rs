//! Linear undo/redo over object snapshots.
//!
//! Each [`History`] is an append-only log of `(counter, snapshot)` entries
//! plus a cursor. Recording after an undo truncates the redo branch. The
//! counters come from one sequence shared by all histories in a
//! [`HistoryRegistry`], which is what lets a single undo/redo keypress pick
//! the right history when several are on screen:
//!
//! - undo goes to the history whose current entry has the greatest counter
//!   (the most recent edit anywhere is undone first)
//! - redo goes to the history whose current entry has the smallest counter
//!   among those with a redo branch (the last undo is redone first)
//!
//! The winner is chosen while key events are offered during one frame and
//! applied the next time its scope is entered.

use crate::autosave::{DebouncePolicy, DirtyTracker};
use crate::backend::KeyEvent;
use crate::config::ShortcutConfig;
use crate::path::WidgetId;
use crate::value::Value;
use std::collections::HashMap;
use std::time::Duration;

#[derive(Debug, Clone)]
struct Snapshot {
    counter: u64,
    value: Value,
}

/// Cursor position relative to the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryState {
    /// Only the baseline exists.
    Clean,
    /// Cursor on the newest entry: undo only.
    Latest,
    /// Cursor moved back from the newest entry: redo is available, and
    /// undo too unless the cursor is on the baseline.
    TimeTraveled,
}

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Snapshot>,
    pos: usize,
    tracker: DirtyTracker,
}

impl History {
    /// Start a history whose baseline is `value`.
    pub fn new(counter: u64, value: &Value) -> Self {
        Self {
            entries: vec![Snapshot {
                counter,
                value: value.clone(),
            }],
            pos: 0,
            tracker: DirtyTracker::new(),
        }
    }

    /// Append a snapshot after the cursor, dropping any redo branch.
    pub fn record(&mut self, counter: u64, value: &Value) {
        self.entries.truncate(self.pos + 1);
        self.entries.push(Snapshot {
            counter,
            value: value.clone(),
        });
        self.pos = self.entries.len() - 1;
    }

    /// Step back. Returns the restored snapshot, or `None` at the origin.
    pub fn undo(&mut self) -> Option<Value> {
        if self.pos == 0 {
            return None;
        }
        self.pos -= 1;
        Some(self.entries[self.pos].value.clone())
    }

    /// Step forward. Returns the restored snapshot, or `None` at the tip.
    pub fn redo(&mut self) -> Option<Value> {
        if self.pos + 1 >= self.entries.len() {
            return None;
        }
        self.pos += 1;
        Some(self.entries[self.pos].value.clone())
    }

    /// Counter used for undo arbitration, if undo is possible.
    pub fn undo_id(&self) -> Option<u64> {
        (self.pos > 0).then(|| self.entries[self.pos].counter)
    }

    /// Counter used for redo arbitration, if redo is possible.
    pub fn redo_id(&self) -> Option<u64> {
        (self.pos + 1 < self.entries.len()).then(|| self.entries[self.pos].counter)
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot under the cursor.
    pub fn current(&self) -> &Value {
        &self.entries[self.pos].value
    }

    pub fn state(&self) -> HistoryState {
        if self.pos == 0 && self.entries.len() == 1 {
            HistoryState::Clean
        } else if self.pos + 1 == self.entries.len() {
            HistoryState::Latest
        } else {
            HistoryState::TimeTraveled
        }
    }

    /// Whether an edit is waiting for its quiet period to elapse.
    pub fn has_pending_snapshot(&self) -> bool {
        self.tracker.is_dirty()
    }
}

/// All histories of a session, keyed by widget identity.
#[derive(Debug, Default)]
pub struct HistoryRegistry {
    histories: HashMap<WidgetId, History>,
    counter: u64,
    undo_candidate: Option<WidgetId>,
    redo_candidate: Option<WidgetId>,
}

impl HistoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_counter(&mut self) -> u64 {
        self.counter += 1;
        self.counter
    }

    pub fn get(&self, id: &WidgetId) -> Option<&History> {
        self.histories.get(id)
    }

    /// Create the history for `id` with `value` as its baseline, unless it
    /// already exists.
    pub fn ensure(&mut self, id: &WidgetId, value: &Value) -> &mut History {
        let counter = &mut self.counter;
        self.histories.entry(id.clone()).or_insert_with(|| {
            *counter += 1;
            tracing::debug!(history = %id, counter = *counter, "created history");
            History::new(*counter, value)
        })
    }

    /// Append a snapshot to `id`'s history with the next global counter.
    pub fn record(&mut self, id: &WidgetId, value: &Value) {
        let counter = self.next_counter();
        self.ensure(id, value).record(counter, value);
        tracing::debug!(history = %id, counter, "recorded snapshot");
    }

    pub fn undo_candidate(&self) -> Option<&WidgetId> {
        self.undo_candidate.as_ref()
    }

    pub fn redo_candidate(&self) -> Option<&WidgetId> {
        self.redo_candidate.as_ref()
    }

    /// Whether any history is waiting to record a snapshot.
    pub fn has_pending_snapshot(&self) -> bool {
        self.histories.values().any(History::has_pending_snapshot)
    }

    /// Let `id` compete for this frame's undo/redo keypresses.
    ///
    /// Only the first event matching either shortcut is considered.
    pub fn offer(&mut self, id: &WidgetId, events: &[KeyEvent], shortcuts: &ShortcutConfig) {
        let Some(history) = self.histories.get(id) else {
            return;
        };

        for event in events {
            if shortcuts.redo.matches(event) {
                if let Some(redo_id) = history.redo_id() {
                    let current = self
                        .redo_candidate
                        .as_ref()
                        .and_then(|c| self.histories.get(c))
                        .and_then(History::redo_id);
                    if current.is_none_or(|current| redo_id < current) {
                        self.redo_candidate = Some(id.clone());
                    }
                }
                break;
            }
            if shortcuts.undo.matches(event) {
                if let Some(undo_id) = history.undo_id() {
                    let current = self
                        .undo_candidate
                        .as_ref()
                        .and_then(|c| self.histories.get(c))
                        .and_then(History::undo_id);
                    if current.is_none_or(|current| undo_id > current) {
                        self.undo_candidate = Some(id.clone());
                    }
                }
                break;
            }
        }
    }

    /// Apply a pending undo or redo for `id`, clearing the candidate.
    /// Returns the snapshot to restore.
    pub fn take_pending(&mut self, id: &WidgetId) -> Option<Value> {
        let mut restored = None;
        if self.undo_candidate.as_ref() == Some(id) {
            self.undo_candidate = None;
            restored = self.histories.get_mut(id).and_then(History::undo);
            tracing::debug!(history = %id, "applied undo");
        }
        if self.redo_candidate.as_ref() == Some(id) {
            self.redo_candidate = None;
            restored = self
                .histories
                .get_mut(id)
                .and_then(History::redo)
                .or(restored);
            tracing::debug!(history = %id, "applied redo");
        }
        restored
    }

    /// Scope exit: note a modification and record a snapshot once the
    /// quiet period has elapsed. Returns whether a snapshot was recorded.
    pub fn settle(
        &mut self,
        id: &WidgetId,
        modified: bool,
        now: Duration,
        policy: &DebouncePolicy,
        value: &Value,
    ) -> bool {
        let history = self.ensure(id, value);
        if modified {
            history.tracker.mark_dirty(now);
        }
        if !history.tracker.should_flush(now, policy) {
            return false;
        }
        history.tracker.save_complete();
        self.record(id, value);
        true
    }
}
