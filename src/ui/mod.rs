//! Terminal front end
//!
//! A ratatui popup over a [`Picker`](crate::picker::Picker) session: the
//! search bar, the tree or ranked result list, and a row of key hints.
//! Input comes from crossterm and is translated through a [`KeyMap`].

pub mod error;
pub mod events;
pub mod layout;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use error::{Result, UiError};
pub use events::{KeyMap, parse_key_string};
pub use layout::{PopupContent, popup_area};
pub use terminal::{PickerView, TerminalPicker};
pub use theme::Theme;
