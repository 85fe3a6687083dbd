//! Configuration for keybinds.

use super::actions::PickerAction;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Keybind overrides from the `[keybinds]` config table.
///
/// Actions missing from the table keep their default keys.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct KeybindConfig {
    pub keybinds: HashMap<String, KeybindDef>,
}

/// Keybind definition - can be single key, multiple keys, or disabled.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KeybindDef {
    /// Single keybind
    Single(String),
    /// Multiple alternative keybinds for the same action
    Multiple(Vec<String>),
}

impl KeybindDef {
    fn keys(&self) -> Vec<String> {
        match self {
            Self::Single(key) => vec![key.clone()],
            Self::Multiple(keys) => keys.clone(),
        }
    }
}

/// Default key strings for an action.
#[must_use]
pub fn default_keys(action: PickerAction) -> &'static [&'static str] {
    match action {
        PickerAction::MoveUp => &["up", "ctrl-k", "ctrl-p"],
        PickerAction::MoveDown => &["down", "ctrl-j", "ctrl-n"],
        PickerAction::Expand => &["right"],
        PickerAction::Collapse => &["left"],
        PickerAction::MoveFirst => &["home"],
        PickerAction::MoveLast => &["end"],
        PickerAction::Confirm => &["enter"],
        PickerAction::Cancel => &["esc", "ctrl-c"],
        PickerAction::DeleteChar => &["bspace"],
        PickerAction::ClearQuery => &["ctrl-u"],
    }
}

impl KeybindConfig {
    /// Get the keybind(s) for an action, falling back to the defaults.
    ///
    /// Returns an empty list if the action is disabled.
    #[must_use]
    pub fn get(&self, action: PickerAction) -> Vec<String> {
        if self.is_disabled(action) {
            return Vec::new();
        }
        self.keybinds.get(action.name()).map_or_else(
            || default_keys(action).iter().map(ToString::to_string).collect(),
            KeybindDef::keys,
        )
    }

    /// Check if a keybind is disabled for an action.
    #[must_use]
    pub fn is_disabled(&self, action: PickerAction) -> bool {
        self.keybinds.get(action.name()).is_some_and(|def| match def {
            KeybindDef::Single(key) => key == "none",
            KeybindDef::Multiple(keys) => keys.iter().all(|k| k == "none"),
        })
    }

    /// Names in the table that match no action.
    #[must_use]
    pub fn unknown_actions(&self) -> Vec<&str> {
        let mut unknown: Vec<&str> = self
            .keybinds
            .keys()
            .map(String::as_str)
            .filter(|name| PickerAction::from_name(name).is_none())
            .collect();
        unknown.sort_unstable();
        unknown
    }
}
