//! Terminal input translation
//!
//! Maps crossterm key and mouse events onto [`PickerKey`]s. Bound keys are
//! looked up in a [`KeyMap`] built from the keybind configuration; any other
//! printable character becomes query input.

use super::error::{Result, UiError};
use crate::keybinds::{KeybindConfig, PickerAction};
use crate::picker::PickerKey;
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};
use std::collections::HashMap;
use tracing::debug;

/// Parse a key string like "ctrl-t" into a `KeyEvent`
///
/// # Examples
/// ```
/// use typepick::ui::parse_key_string;
///
/// let key = parse_key_string("ctrl-k");
/// assert!(key.is_some());
/// ```
#[must_use]
pub fn parse_key_string(s: &str) -> Option<KeyEvent> {
    // "ctrl--" binds the minus key
    let (prefix, key_part) = match s.strip_suffix("--") {
        Some(prefix) => (prefix, "-"),
        None => s.rsplit_once('-').unwrap_or(("", s)),
    };

    let mut modifiers = KeyModifiers::NONE;
    for part in prefix.split('-').filter(|p| !p.is_empty()) {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            _ => return None,
        }
    }

    let code = match key_part.to_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "btab" | "backtab" => KeyCode::BackTab,
        "bspace" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pgup" | "pageup" => KeyCode::PageUp,
        "pgdn" | "pagedown" => KeyCode::PageDown,
        "space" => KeyCode::Char(' '),
        s if s.starts_with('f') && s.len() > 1 => s[1..].parse().ok().map(KeyCode::F)?,
        _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
        _ => return None,
    };

    Some(KeyEvent::new(code, modifiers))
}

/// Shift is implied by the character itself, so it is dropped for chars
fn normalize(code: KeyCode, modifiers: KeyModifiers) -> (KeyCode, KeyModifiers) {
    match code {
        KeyCode::Char(_) => (code, modifiers.difference(KeyModifiers::SHIFT)),
        _ => (code, modifiers),
    }
}

/// Lookup table from terminal keys to picker actions
#[derive(Debug, Clone, Default)]
pub struct KeyMap {
    binds: HashMap<(KeyCode, KeyModifiers), PickerAction>,
}

impl KeyMap {
    /// Build the map from keybind configuration
    ///
    /// When two actions claim the same key, the one listed first in
    /// [`PickerAction::ALL`] wins.
    ///
    /// # Errors
    ///
    /// Returns [`UiError::InvalidKeybind`] for an unparsable key string.
    pub fn from_config(config: &KeybindConfig) -> Result<Self> {
        let mut binds = HashMap::new();

        for action in PickerAction::ALL {
            for key_str in config.get(action) {
                if key_str == "none" {
                    continue;
                }
                let key = parse_key_string(&key_str).ok_or_else(|| UiError::InvalidKeybind {
                    action: action.name().to_string(),
                    key: key_str.clone(),
                })?;
                binds.entry(normalize(key.code, key.modifiers)).or_insert(action);
            }
        }

        debug!(count = binds.len(), "keymap built");
        Ok(Self { binds })
    }

    /// Action bound to a key, if any
    #[must_use]
    pub fn action(&self, key: &KeyEvent) -> Option<PickerAction> {
        self.binds.get(&normalize(key.code, key.modifiers)).copied()
    }

    /// Translate a key press; key releases are dropped
    #[must_use]
    pub fn translate_key(&self, key: &KeyEvent) -> Option<PickerKey> {
        if key.kind == KeyEventKind::Release {
            return None;
        }
        if let Some(action) = self.action(key) {
            return Some(action.key());
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char(c), KeyModifiers::NONE | KeyModifiers::SHIFT) => Some(PickerKey::Char(c)),
            _ => None,
        }
    }

    /// Translate any terminal event
    #[must_use]
    pub fn translate(&self, event: &Event) -> Option<PickerKey> {
        match event {
            Event::Key(key) => self.translate_key(key),
            Event::Mouse(mouse) => translate_mouse(mouse),
            _ => None,
        }
    }
}

/// Mouse wheel moves the selection
fn translate_mouse(mouse: &MouseEvent) -> Option<PickerKey> {
    match mouse.kind {
        MouseEventKind::ScrollUp => Some(PickerKey::Up),
        MouseEventKind::ScrollDown => Some(PickerKey::Down),
        _ => None,
    }
}
