//! Interactive picking session
//!
//! A [`Picker`] wraps a [`PathTree`](crate::tree::PathTree) with a query and
//! a navigation mode:
//!
//! - **Browsing** (empty query): the tree is shown with per-folder expand
//!   state. Up/Down walk the expanded subtree order, Right/Left open and
//!   close folders.
//! - **Searching** (non-empty query): a flat list of matching leaves, best
//!   score first. Up/Down walk the list; the ancestors of whatever is
//!   selected are opened so the selection is still visible after the query
//!   is cleared.
//!
//! Enter on a leaf (or on the null entry) ends the session with exactly one
//! [`KeyOutcome::Finalized`].
//!
//! ```
//! use typepick::matcher::WordStartMatcher;
//! use typepick::picker::{Picker, PickerKey, PickerOptions, SessionOutcome};
//! use typepick::tree::PathTree;
//!
//! let mut tree = PathTree::new();
//! tree.insert("Game/GreetingLogger", "GreetingLogger", 1).unwrap();
//! tree.insert("Game/AnotherLogger", "AnotherLogger", 2).unwrap();
//!
//! let options = PickerOptions { search_min_items: 0, expand_all: false };
//! let mut picker = Picker::new(tree, Box::new(WordStartMatcher), options);
//!
//! let keys = [PickerKey::Char('G'), PickerKey::Char('L'), PickerKey::Enter];
//! assert_eq!(picker.run(keys), SessionOutcome::Finalized(Some(1)));
//! ```

mod events;
mod state;

pub use events::{KeyOutcome, PickerKey, SessionOutcome, handle_key};
pub use state::{DEFAULT_SEARCH_MIN_ITEMS, Mode, Picker, PickerOptions, Row};
