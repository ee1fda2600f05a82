//! Translation of egui key events into engine key events.

use autogui_core::{KeyEvent, Modifiers};

/// Key events from one frame's input, in order. Auto-repeats and keys
/// without a single-character name are dropped.
pub fn translate_events(events: &[egui::Event]) -> Vec<KeyEvent> {
    events.iter().filter_map(translate).collect()
}

pub fn translate(event: &egui::Event) -> Option<KeyEvent> {
    let egui::Event::Key {
        key,
        pressed,
        repeat,
        modifiers,
        ..
    } = event
    else {
        return None;
    };
    if *repeat {
        return None;
    }

    let mut chars = key.name().chars();
    let (Some(c), None) = (chars.next(), chars.next()) else {
        return None;
    };

    // Cmd counts as Ctrl on macOS.
    let modifiers = Modifiers {
        ctrl: modifiers.ctrl || modifiers.command,
        shift: modifiers.shift,
        alt: modifiers.alt,
    };
    Some(if *pressed {
        KeyEvent::press(c, modifiers)
    } else {
        KeyEvent::release(c, modifiers)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use autogui_core::Chord;

    fn key(key: egui::Key, pressed: bool, modifiers: egui::Modifiers) -> egui::Event {
        egui::Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat: false,
            modifiers,
        }
    }

    #[test]
    fn test_ctrl_z_matches_undo_chord() {
        let events = [key(egui::Key::Z, true, egui::Modifiers::CTRL)];
        let translated = translate_events(&events);
        assert_eq!(translated.len(), 1);
        assert!(Chord::ctrl('z').matches(&translated[0]));
    }

    #[test]
    fn test_non_key_events_and_named_keys_are_dropped() {
        let events = [
            egui::Event::Text("z".to_string()),
            key(egui::Key::Escape, true, egui::Modifiers::NONE),
            key(egui::Key::Y, false, egui::Modifiers::CTRL),
        ];
        let translated = translate_events(&events);
        assert_eq!(translated, vec![KeyEvent::release('y', Modifiers::CTRL)]);
    }
}
