//! Keybind system for the interactive picker.
//!
//! Keys are configured per action as strings such as `"ctrl-k"` or
//! `["up", "ctrl-p"]`; the terminal front end turns them into key events.

pub mod actions;
pub mod config;

pub use actions::PickerAction;
pub use config::{KeybindConfig, KeybindDef, default_keys};
