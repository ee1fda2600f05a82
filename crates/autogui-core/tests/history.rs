//! Integration tests for undo/redo histories.

use std::time::Duration;

use autogui_core::{
    AutoGuiConfig, Chord, History, HistoryRegistry, HistoryState, KeyEvent, ManualClock,
    Modifiers, Record, ScriptedBackend, Session, ShortcutConfig, Value, WidgetId,
};
use proptest::prelude::*;

fn doc(x: i64) -> Value {
    Record::new("Doc").with("x", x).into()
}

fn x_of(value: &Value) -> Option<i64> {
    value.as_record()?.get("x")?.as_i64()
}

/// Renders one frame of `value` under the history `name` and starts the
/// next frame. Returns whether the frame reported a modification.
fn frame(session: &mut Session, backend: &mut ScriptedBackend, name: &str, value: &mut Value) -> bool {
    let modified = {
        let mut ui = session.frame(backend);
        let (result, modified) = ui.scoped(|ui| {
            ui.mod_history(name, value, |ui, value| ui.render(value, "").map(|_| ()))
        });
        result.unwrap();
        modified
    };
    backend.next_frame();
    modified
}

fn session_with(clock: &ManualClock) -> Session {
    Session::with_clock(AutoGuiConfig::default(), clock.clone())
}

fn ms(ms: u64) -> Duration {
    Duration::from_millis(ms)
}

#[test]
fn test_undo_and_redo_through_shortcuts() {
    let clock = ManualClock::new();
    let mut session = session_with(&clock);
    let mut backend = ScriptedBackend::new();
    let mut value = doc(0);

    backend.edit("x", 1i64);
    assert!(frame(&mut session, &mut backend, "doc", &mut value));
    clock.set(ms(600));
    frame(&mut session, &mut backend, "doc", &mut value);

    let id = WidgetId::new("doc").with("history");
    let history = session.histories().get(&id).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history.state(), HistoryState::Latest);

    // The shortcut picks a candidate in one frame and applies it in the next.
    backend.key(Chord::ctrl('z').press());
    clock.set(ms(700));
    assert!(!frame(&mut session, &mut backend, "doc", &mut value));
    assert_eq!(x_of(&value), Some(1));
    assert!(frame(&mut session, &mut backend, "doc", &mut value));
    assert_eq!(x_of(&value), Some(0));

    // Restoring a snapshot is not itself recorded.
    clock.set(ms(2000));
    frame(&mut session, &mut backend, "doc", &mut value);
    assert_eq!(session.histories().get(&id).unwrap().len(), 2);

    backend.key(KeyEvent::press('y', Modifiers::CTRL));
    frame(&mut session, &mut backend, "doc", &mut value);
    assert!(frame(&mut session, &mut backend, "doc", &mut value));
    assert_eq!(x_of(&value), Some(1));
}

#[test]
fn test_undo_at_origin_is_noop() {
    let clock = ManualClock::new();
    let mut session = session_with(&clock);
    let mut backend = ScriptedBackend::new();
    let mut value = doc(3);

    backend.key(Chord::ctrl('z').press());
    frame(&mut session, &mut backend, "doc", &mut value);
    assert!(!frame(&mut session, &mut backend, "doc", &mut value));

    assert_eq!(value, doc(3));
    assert_eq!(session.histories().undo_candidate(), None);
}

#[test]
fn test_newest_edit_wins_undo() {
    let shortcuts = ShortcutConfig::default();
    let mut registry = HistoryRegistry::new();
    let a = WidgetId::new("a");
    let b = WidgetId::new("b");

    registry.ensure(&a, &Value::int(0));
    registry.ensure(&b, &Value::int(0));
    registry.record(&b, &Value::int(1));
    registry.record(&b, &Value::int(2));
    registry.record(&a, &Value::int(10));
    for v in 3..7 {
        registry.record(&b, &Value::int(v));
    }
    assert_eq!(registry.get(&a).unwrap().undo_id(), Some(5));
    assert_eq!(registry.get(&b).unwrap().undo_id(), Some(9));

    let undo = [shortcuts.undo.press()];
    registry.offer(&a, &undo, &shortcuts);
    registry.offer(&b, &undo, &shortcuts);
    assert_eq!(registry.undo_candidate(), Some(&b));

    // Offer order does not matter.
    let mut registry_rev = HistoryRegistry::new();
    registry_rev.ensure(&a, &Value::int(0));
    registry_rev.ensure(&b, &Value::int(0));
    registry_rev.record(&a, &Value::int(10));
    registry_rev.record(&b, &Value::int(1));
    registry_rev.offer(&b, &undo, &shortcuts);
    registry_rev.offer(&a, &undo, &shortcuts);
    assert_eq!(registry_rev.undo_candidate(), Some(&b));
}

#[test]
fn test_last_undo_is_redone_first() {
    let shortcuts = ShortcutConfig::default();
    let mut registry = HistoryRegistry::new();
    let a = WidgetId::new("a");
    let b = WidgetId::new("b");
    registry.ensure(&a, &Value::int(0));
    registry.ensure(&b, &Value::int(0));
    registry.record(&a, &Value::int(1));
    registry.record(&b, &Value::int(1));

    let undo = [shortcuts.undo.press()];
    let redo = [shortcuts.redo.press()];

    // Undo b (newest), then a.
    registry.offer(&a, &undo, &shortcuts);
    registry.offer(&b, &undo, &shortcuts);
    assert_eq!(registry.take_pending(&b), Some(Value::int(0)));
    registry.offer(&a, &undo, &shortcuts);
    registry.offer(&b, &undo, &shortcuts);
    assert_eq!(registry.take_pending(&a), Some(Value::int(0)));

    registry.offer(&a, &redo, &shortcuts);
    registry.offer(&b, &redo, &shortcuts);
    assert_eq!(registry.redo_candidate(), Some(&a));
}

#[test]
fn test_two_histories_in_one_frame() {
    let clock = ManualClock::new();
    let mut session = session_with(&clock);
    let mut backend = ScriptedBackend::new();
    let mut left = doc(0);
    let mut right = doc(0);

    let both = |session: &mut Session,
                backend: &mut ScriptedBackend,
                left: &mut Value,
                right: &mut Value| {
        {
            let mut ui = session.frame(backend);
            ui.mod_history("left", left, |ui, v| ui.render(v, "left").map(|_| ()))
                .unwrap();
            ui.mod_history("right", right, |ui, v| ui.render(v, "right").map(|_| ()))
                .unwrap();
        }
        backend.next_frame();
    };

    backend.edit("left/x", 1i64);
    both(&mut session, &mut backend, &mut left, &mut right);
    clock.set(ms(600));
    both(&mut session, &mut backend, &mut left, &mut right);

    backend.edit("right/x", 2i64);
    clock.set(ms(1000));
    both(&mut session, &mut backend, &mut left, &mut right);
    clock.set(ms(1600));
    both(&mut session, &mut backend, &mut left, &mut right);

    backend.key(Chord::ctrl('z').press());
    both(&mut session, &mut backend, &mut left, &mut right);
    both(&mut session, &mut backend, &mut left, &mut right);

    assert_eq!(x_of(&left), Some(1));
    assert_eq!(x_of(&right), Some(0));
}

proptest! {
    #[test]
    fn prop_undo_then_redo_round_trips(initial in any::<i64>(), edits in prop::collection::vec(any::<i64>(), 1..8)) {
        let mut history = History::new(0, &Value::int(initial));
        for (i, v) in edits.iter().enumerate() {
            history.record(i as u64 + 1, &Value::int(*v));
        }
        let k = edits.len();

        for _ in 0..k {
            prop_assert!(history.undo().is_some());
        }
        prop_assert_eq!(history.current(), &Value::int(initial));
        prop_assert!(history.undo().is_none());
        prop_assert_eq!(history.pos(), 0);

        for _ in 0..k {
            prop_assert!(history.redo().is_some());
        }
        prop_assert_eq!(history.current(), &Value::int(edits[k - 1]));
        prop_assert!(history.redo().is_none());
        prop_assert_eq!(history.pos(), k);
    }
}
