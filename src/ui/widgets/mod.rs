//! Widgets of the picker popup

pub mod help_bar;
pub mod search_bar;
pub mod type_tree;

pub use help_bar::{HelpBar, KeyHint, hints_for};
pub use search_bar::SearchBar;
pub use type_tree::{RowKind, RowView, TypeTree, TypeTreeState, row_views};
