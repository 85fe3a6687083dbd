//! Key dispatch for a picker session
//!
//! [`handle_key`] is the whole navigation state machine: it takes the
//! session state and one key and reports what happened. Front ends translate
//! their native input into [`PickerKey`] and react to the returned
//! [`KeyOutcome`]; nothing here knows about terminals.

use super::state::{Mode, Picker};
use crate::tree::Selection;
use tracing::{debug, info};

/// Host-independent input keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickerKey {
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Enter,
    Escape,
    Backspace,
    ClearQuery,
    Char(char),
}

/// Result of handling one key
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome<V> {
    /// Selection or expand state changed
    Continue,
    /// The query changed and results were recomputed
    QueryChanged,
    /// Session finished with a leaf value, or `None` for the null entry
    Finalized(Option<V>),
    /// Session finished without a choice
    Cancelled,
    /// Nothing happened
    Ignored,
}

/// How a whole session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome<V> {
    Finalized(Option<V>),
    Cancelled,
    /// The key queue ran dry before the session ended
    Pending,
}

fn changed<V>(did_change: bool, outcome: KeyOutcome<V>) -> KeyOutcome<V> {
    if did_change {
        outcome
    } else {
        KeyOutcome::Ignored
    }
}

/// Apply one key to the session
///
/// After a `Finalized` or `Cancelled` outcome every further key is ignored,
/// so a session notifies its caller at most once.
pub fn handle_key<V: Clone>(state: &mut Picker<V>, key: PickerKey) -> KeyOutcome<V> {
    if state.finished {
        return KeyOutcome::Ignored;
    }

    match key {
        PickerKey::Escape => {
            state.finished = true;
            info!("picker cancelled");
            KeyOutcome::Cancelled
        }
        PickerKey::Enter => activate(state),

        PickerKey::Up => {
            state.move_up();
            KeyOutcome::Continue
        }
        PickerKey::Down => {
            state.move_down();
            KeyOutcome::Continue
        }
        PickerKey::Home => {
            state.move_first();
            KeyOutcome::Continue
        }
        PickerKey::End => {
            state.move_last();
            KeyOutcome::Continue
        }
        PickerKey::Right => changed(state.expand_selected(), KeyOutcome::Continue),
        PickerKey::Left => changed(state.collapse_selected(), KeyOutcome::Continue),

        PickerKey::Char(c) => changed(state.push_char(c), KeyOutcome::QueryChanged),
        PickerKey::Backspace => changed(state.pop_char(), KeyOutcome::QueryChanged),
        PickerKey::ClearQuery => changed(state.clear_query(), KeyOutcome::QueryChanged),
    }
}

fn activate<V: Clone>(state: &mut Picker<V>) -> KeyOutcome<V> {
    match state.activation_target() {
        Selection::None => KeyOutcome::Ignored,
        Selection::Null => {
            state.finished = true;
            info!("picker finalized with no value");
            KeyOutcome::Finalized(None)
        }
        Selection::Node(id) if state.tree.is_folder(id) => {
            state.toggle_folder(id);
            debug!(folder = %state.tree.path_of(id), "toggled folder");
            KeyOutcome::Continue
        }
        Selection::Node(id) => {
            let value = state.tree.value(id).cloned();
            state.finished = true;
            info!(leaf = %state.tree.path_of(id), "picker finalized");
            KeyOutcome::Finalized(value)
        }
    }
}

impl<V: Clone> Picker<V> {
    /// Apply one key to the session
    pub fn handle_key(&mut self, key: PickerKey) -> KeyOutcome<V> {
        handle_key(self, key)
    }

    /// Feed keys until the session ends or the queue runs dry
    pub fn run<I>(&mut self, keys: I) -> SessionOutcome<V>
    where
        I: IntoIterator<Item = PickerKey>,
    {
        for key in keys {
            match self.handle_key(key) {
                KeyOutcome::Finalized(value) => return SessionOutcome::Finalized(value),
                KeyOutcome::Cancelled => return SessionOutcome::Cancelled,
                KeyOutcome::Continue | KeyOutcome::QueryChanged | KeyOutcome::Ignored => {}
            }
        }
        SessionOutcome::Pending
    }

    /// Whether the session is currently showing the flat result list
    #[must_use]
    pub fn is_searching(&self) -> bool {
        self.mode() == Mode::Searching
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::WordStartMatcher;
    use crate::picker::PickerOptions;
    use crate::testing::sample_tree;

    fn make_picker(with_null: bool) -> Picker<String> {
        Picker::new(
            sample_tree(with_null),
            Box::new(WordStartMatcher),
            PickerOptions {
                search_min_items: 0,
                expand_all: false,
            },
        )
    }

    fn keys(text: &str) -> Vec<PickerKey> {
        text.chars().map(PickerKey::Char).collect()
    }

    #[test]
    fn test_enter_on_null_finalizes_none() {
        let mut picker = make_picker(true);
        assert_eq!(picker.handle_key(PickerKey::Enter), KeyOutcome::Finalized(None));
        assert!(picker.is_finished());
    }

    #[test]
    fn test_enter_on_folder_toggles() {
        let mut picker = make_picker(false);
        let folder = picker.selection().node().unwrap();
        assert!(picker.tree().is_folder(folder));

        assert_eq!(picker.handle_key(PickerKey::Enter), KeyOutcome::Continue);
        assert!(picker.tree().is_expanded(folder));
        assert_eq!(picker.handle_key(PickerKey::Enter), KeyOutcome::Continue);
        assert!(!picker.tree().is_expanded(folder));
        assert!(!picker.is_finished());
    }

    #[test]
    fn test_finalize_notifies_exactly_once() {
        let mut picker = make_picker(true);
        let mut notifications = Vec::new();

        let mut queue = keys("SoundMan");
        queue.extend([PickerKey::Enter, PickerKey::Enter, PickerKey::Down, PickerKey::Escape]);
        for key in queue {
            if let KeyOutcome::Finalized(value) = picker.handle_key(key) {
                notifications.push(value);
            }
        }

        assert_eq!(
            notifications,
            vec![Some("Audio.SoundManager".to_string())]
        );
    }

    #[test]
    fn test_escape_cancels() {
        let mut picker = make_picker(true);
        assert_eq!(picker.handle_key(PickerKey::Escape), KeyOutcome::Cancelled);
        assert_eq!(picker.handle_key(PickerKey::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn test_right_expands_then_descends() {
        let mut picker = make_picker(false);
        let folder = picker.selection().node().unwrap();

        assert_eq!(picker.handle_key(PickerKey::Right), KeyOutcome::Continue);
        assert!(picker.tree().is_expanded(folder));
        assert_eq!(picker.selection(), Selection::Node(folder));

        assert_eq!(picker.handle_key(PickerKey::Right), KeyOutcome::Continue);
        let child = picker.selection().node().unwrap();
        assert_eq!(picker.tree().parent(child), Some(folder));
    }

    #[test]
    fn test_left_collapses_then_climbs() {
        let mut picker = make_picker(false);
        let folder = picker.selection().node().unwrap();
        picker.run([PickerKey::Right, PickerKey::Right]);

        // on a leaf: climb to parent
        assert_eq!(picker.handle_key(PickerKey::Left), KeyOutcome::Continue);
        assert_eq!(picker.selection(), Selection::Node(folder));

        // on an open folder: collapse
        assert_eq!(picker.handle_key(PickerKey::Left), KeyOutcome::Continue);
        assert!(!picker.tree().is_expanded(folder));

        // top-level closed folder: nothing to do
        assert_eq!(picker.handle_key(PickerKey::Left), KeyOutcome::Ignored);
    }

    #[test]
    fn test_left_right_ignored_while_searching() {
        let mut picker = make_picker(false);
        picker.run(keys("log"));
        assert!(picker.is_searching());
        assert_eq!(picker.handle_key(PickerKey::Right), KeyOutcome::Ignored);
        assert_eq!(picker.handle_key(PickerKey::Left), KeyOutcome::Ignored);
    }

    #[test]
    fn test_down_in_search_walks_results_and_reveals() {
        let mut picker = make_picker(false);
        picker.run(keys("logger"));
        let results: Vec<_> = picker.results().iter().map(|r| r.id).collect();
        assert!(results.len() >= 2);

        picker.handle_key(PickerKey::Down);
        assert_eq!(picker.selection(), Selection::Node(results[1]));
        assert!(picker.tree().is_visible(results[1]));

        picker.handle_key(PickerKey::Up);
        picker.handle_key(PickerKey::Up);
        assert_eq!(picker.selection(), Selection::Node(results[0]));
    }

    #[test]
    fn test_browsing_down_walks_expanded_order() {
        let mut picker = make_picker(false);
        picker.run([PickerKey::Right, PickerKey::Down]);
        let first = picker.selection().node().unwrap();
        let audio = picker.tree().parent(first).unwrap();
        assert_eq!(picker.tree().path_of(audio), "Audio");

        // past the last Audio child we climb back to the next top-level folder
        picker.run([PickerKey::Down, PickerKey::Down]);
        let next = picker.selection().node().unwrap();
        assert_eq!(picker.tree().path_of(next), "Game");
    }

    #[test]
    fn test_backspace_returns_to_browsing() {
        let mut picker = make_picker(true);
        picker.run(keys("ab"));
        assert!(picker.is_searching());

        assert_eq!(picker.handle_key(PickerKey::Backspace), KeyOutcome::QueryChanged);
        assert_eq!(picker.handle_key(PickerKey::Backspace), KeyOutcome::QueryChanged);
        assert!(!picker.is_searching());
        assert_eq!(picker.handle_key(PickerKey::Backspace), KeyOutcome::Ignored);
    }

    #[test]
    fn test_enter_without_results_is_ignored() {
        let mut picker = make_picker(true);
        picker.run(keys("zzzz"));
        assert!(picker.results().is_empty());
        assert_eq!(picker.handle_key(PickerKey::Enter), KeyOutcome::Ignored);
    }

    #[test]
    fn test_unchanged_state_drops_owned_outcome() {
        let outcome = changed(false, KeyOutcome::Finalized(Some("A.B".to_string())));
        assert_eq!(outcome, KeyOutcome::Ignored);
        assert_eq!(changed(true, KeyOutcome::<String>::Continue), KeyOutcome::Continue);
    }

    #[test]
    fn test_enter_after_selecting_outside_results() {
        let mut picker = make_picker(true);
        picker.set_query("PQ");
        assert!(picker.select_value(&"Audio.MusicPlayer".to_string()));

        assert_eq!(
            picker.handle_key(PickerKey::Enter),
            KeyOutcome::Finalized(Some("Audio.MusicPlayer".to_string()))
        );
    }

    #[test]
    fn test_space_alone_keeps_tree_navigation() {
        let mut picker = make_picker(true);
        assert_eq!(picker.handle_key(PickerKey::Char(' ')), KeyOutcome::QueryChanged);
        assert!(!picker.is_searching());

        picker.handle_key(PickerKey::Down);
        assert_ne!(picker.selection(), Selection::Null);
    }

    #[test]
    fn test_run_reports_pending() {
        let mut picker = make_picker(true);
        assert_eq!(picker.run([PickerKey::Down]), SessionOutcome::Pending);
        assert_eq!(
            picker.run([PickerKey::Escape, PickerKey::Enter]),
            SessionOutcome::Cancelled
        );
    }
}
