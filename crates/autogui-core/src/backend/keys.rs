//! Key events and shortcut chords.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
}

/// Modifier keys held during a key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        shift: false,
        alt: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        shift: false,
        alt: false,
    };
}

/// One key event. Keys are identified by their lowercase character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: char,
    pub action: KeyAction,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn press(key: char, modifiers: Modifiers) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            action: KeyAction::Press,
            modifiers,
        }
    }

    pub fn release(key: char, modifiers: Modifiers) -> Self {
        Self {
            key: key.to_ascii_lowercase(),
            action: KeyAction::Release,
            modifiers,
        }
    }
}

/// Keyboard shortcut such as `Ctrl+Z`. Stored in config files as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Chord {
    pub key: char,
    pub modifiers: Modifiers,
}

impl Chord {
    pub const fn new(key: char, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub const fn ctrl(key: char) -> Self {
        Self::new(key, Modifiers::CTRL)
    }

    /// A press of exactly this key with exactly these modifiers.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.action == KeyAction::Press
            && event.key.eq_ignore_ascii_case(&self.key)
            && event.modifiers == self.modifiers
    }

    /// The press event that triggers this chord.
    pub fn press(&self) -> KeyEvent {
        KeyEvent::press(self.key, self.modifiers)
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.ctrl {
            f.write_str("Ctrl+")?;
        }
        if self.modifiers.shift {
            f.write_str("Shift+")?;
        }
        if self.modifiers.alt {
            f.write_str("Alt+")?;
        }
        write!(f, "{}", self.key.to_ascii_uppercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid shortcut '{0}'")]
pub struct ParseChordError(pub String);

impl FromStr for Chord {
    type Err = ParseChordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut modifiers = Modifiers::NONE;
        let mut key = None;
        for part in s.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" => modifiers.ctrl = true,
                "shift" => modifiers.shift = true,
                "alt" | "option" => modifiers.alt = true,
                other => {
                    let mut chars = other.chars();
                    match (chars.next(), chars.next(), key) {
                        (Some(c), None, None) => key = Some(c),
                        _ => return Err(ParseChordError(s.to_string())),
                    }
                }
            }
        }
        key.map(|key| Chord { key, modifiers })
            .ok_or_else(|| ParseChordError(s.to_string()))
    }
}

impl TryFrom<String> for Chord {
    type Error = ParseChordError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Chord> for String {
    fn from(chord: Chord) -> Self {
        chord.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let chord: Chord = "Ctrl+Shift+z".parse().unwrap();
        assert!(chord.modifiers.ctrl && chord.modifiers.shift);
        assert_eq!(chord.key, 'z');
        assert_eq!(chord.to_string(), "Ctrl+Shift+Z");
        assert!("Ctrl+".parse::<Chord>().is_err());
        assert!("Ctrl+ZZ".parse::<Chord>().is_err());
    }

    #[test]
    fn test_matches_requires_exact_modifiers() {
        let undo = Chord::ctrl('z');
        assert!(undo.matches(&KeyEvent::press('Z', Modifiers::CTRL)));
        assert!(!undo.matches(&KeyEvent::release('z', Modifiers::CTRL)));
        let ctrl_shift = Modifiers {
            shift: true,
            ..Modifiers::CTRL
        };
        assert!(!undo.matches(&KeyEvent::press('z', ctrl_shift)));
        assert!(!undo.matches(&KeyEvent::press('z', Modifiers::NONE)));
    }
}
