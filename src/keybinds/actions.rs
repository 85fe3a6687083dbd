//! Action types for picker keybinds.

use crate::picker::PickerKey;

/// Actions that can be bound to keys in the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerAction {
    /// Select the previous row - Up
    MoveUp,
    /// Select the next row - Down
    MoveDown,
    /// Open the selected folder or step into it - Right
    Expand,
    /// Close the selected folder or step out of it - Left
    Collapse,
    /// Jump to the first row - Home
    MoveFirst,
    /// Jump to the last row - End
    MoveLast,
    /// Toggle a folder or pick a leaf - Enter
    Confirm,
    /// Close without picking - Esc
    Cancel,
    /// Delete the last query character - Backspace
    DeleteChar,
    /// Clear the whole query - Ctrl+U
    ClearQuery,
}

impl PickerAction {
    /// Every action, in help display order.
    pub const ALL: [Self; 10] = [
        Self::MoveUp,
        Self::MoveDown,
        Self::Expand,
        Self::Collapse,
        Self::MoveFirst,
        Self::MoveLast,
        Self::Confirm,
        Self::Cancel,
        Self::DeleteChar,
        Self::ClearQuery,
    ];

    /// Name used as the key in the `[keybinds]` config table.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::MoveUp => "move_up",
            Self::MoveDown => "move_down",
            Self::Expand => "expand",
            Self::Collapse => "collapse",
            Self::MoveFirst => "move_first",
            Self::MoveLast => "move_last",
            Self::Confirm => "confirm",
            Self::Cancel => "cancel",
            Self::DeleteChar => "delete_char",
            Self::ClearQuery => "clear_query",
        }
    }

    /// Look up an action by its config name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|action| action.name() == name)
    }

    /// The picker key this action feeds into the session.
    #[must_use]
    pub const fn key(self) -> PickerKey {
        match self {
            Self::MoveUp => PickerKey::Up,
            Self::MoveDown => PickerKey::Down,
            Self::Expand => PickerKey::Right,
            Self::Collapse => PickerKey::Left,
            Self::MoveFirst => PickerKey::Home,
            Self::MoveLast => PickerKey::End,
            Self::Confirm => PickerKey::Enter,
            Self::Cancel => PickerKey::Escape,
            Self::DeleteChar => PickerKey::Backspace,
            Self::ClearQuery => PickerKey::ClearQuery,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_round_trips() {
        for action in PickerAction::ALL {
            assert_eq!(PickerAction::from_name(action.name()), Some(action));
        }
        assert_eq!(PickerAction::from_name("add_tag"), None);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(PickerAction::Expand.key(), PickerKey::Right);
        assert_eq!(PickerAction::Cancel.key(), PickerKey::Escape);
    }
}
