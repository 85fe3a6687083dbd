//! Picker session state
//!
//! Owns the tree, the query and the filtered result list for one interactive
//! session. Every method here is a synchronous state update; key dispatch
//! lives in [`super::events`].

use crate::matcher::{MatchScore, Matcher};
use crate::tree::{NodeId, PathTree, ScoredLeaf, Selection};
use tracing::debug;

/// Default candidate count below which typing a query is disabled
pub const DEFAULT_SEARCH_MIN_ITEMS: usize = 10;

/// Navigation mode, derived from the query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Query is empty; the tree is shown with its expand state
    #[default]
    Browsing,
    /// Query is non-empty; a flat, score-ordered list is shown
    Searching,
}

/// Session behaviour switches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerOptions {
    /// Typing is ignored while the tree has fewer leaves than this
    pub search_min_items: usize,
    /// Open every folder when the session starts
    pub expand_all: bool,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            search_min_items: DEFAULT_SEARCH_MIN_ITEMS,
            expand_all: false,
        }
    }
}

/// One displayable row of the current view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Row {
    /// What selecting this row selects
    pub target: Selection,
    /// Indentation level; always 0 while searching
    pub depth: usize,
    /// Match score while searching
    pub score: Option<MatchScore>,
}

/// State of one picking session
pub struct Picker<V> {
    pub(super) tree: PathTree<V>,
    pub(super) matcher: Box<dyn Matcher>,
    pub(super) query: String,
    pub(super) mode: Mode,
    pub(super) results: Vec<ScoredLeaf>,
    pub(super) cursor: usize,
    pub(super) options: PickerOptions,
    pub(super) finished: bool,
}

impl<V> std::fmt::Debug for Picker<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Picker")
            .field("query", &self.query)
            .field("mode", &self.mode)
            .field("results", &self.results.len())
            .field("cursor", &self.cursor)
            .field("selection", &self.tree.selection())
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<V> Picker<V> {
    /// Start a session over `tree`
    ///
    /// A selection already present on the tree is kept and made visible;
    /// otherwise the first row is selected.
    #[must_use]
    pub fn new(mut tree: PathTree<V>, matcher: Box<dyn Matcher>, options: PickerOptions) -> Self {
        if options.expand_all {
            tree.expand_all();
        }

        let mut picker = Self {
            tree,
            matcher,
            query: String::new(),
            mode: Mode::Browsing,
            results: Vec::new(),
            cursor: 0,
            options,
            finished: false,
        };
        picker.reveal_selection();
        picker
    }

    #[must_use]
    pub const fn tree(&self) -> &PathTree<V> {
        &self.tree
    }

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// Filtered leaves while searching, best first
    #[must_use]
    pub fn results(&self) -> &[ScoredLeaf] {
        &self.results
    }

    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.tree.selection()
    }

    /// Value of the selected leaf
    #[must_use]
    pub fn selected_value(&self) -> Option<&V> {
        self.selection().node().and_then(|id| self.tree.value(id))
    }

    /// True once the session was finalized or cancelled
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Whether the query can be edited
    #[must_use]
    pub fn search_enabled(&self) -> bool {
        self.tree.leaf_count() >= self.options.search_min_items
    }

    /// Rows of the current view, top to bottom
    #[must_use]
    pub fn rows(&self) -> Vec<Row> {
        match self.mode {
            Mode::Searching => self
                .results
                .iter()
                .map(|leaf| Row {
                    target: Selection::Node(leaf.id),
                    depth: 0,
                    score: Some(leaf.score),
                })
                .collect(),
            Mode::Browsing => {
                let null_row = self.tree.null_label().map(|_| Row {
                    target: Selection::Null,
                    depth: 0,
                    score: None,
                });
                null_row
                    .into_iter()
                    .chain(self.tree.visible().map(|(id, depth)| Row {
                        target: Selection::Node(id),
                        depth,
                        score: None,
                    }))
                    .collect()
            }
        }
    }

    /// Position of the selection within [`rows`](Self::rows)
    #[must_use]
    pub fn selected_row(&self) -> Option<usize> {
        match self.mode {
            Mode::Searching => (!self.results.is_empty()).then_some(self.cursor),
            Mode::Browsing => {
                let selection = self.selection();
                self.rows().iter().position(|row| row.target == selection)
            }
        }
    }

    /// Select a specific row target
    ///
    /// While searching, a target outside the result list clears the query
    /// so the session returns to browsing with that target selected.
    pub fn select(&mut self, target: Selection) {
        if self.mode == Mode::Searching {
            match self.result_position(target) {
                Some(position) => self.cursor = position,
                None => {
                    debug!("selection outside results, clearing query");
                    self.query.clear();
                    self.mode = Mode::Browsing;
                    self.results.clear();
                    self.cursor = 0;
                }
            }
        }
        self.tree.select(target);
        if let Some(id) = target.node() {
            self.tree.expand_ancestors(id);
        }
    }

    /// Move to the next row
    pub fn move_down(&mut self) {
        match self.mode {
            Mode::Searching => self.move_cursor(self.cursor.saturating_add(1)),
            Mode::Browsing => {
                let next = match self.tree.selection() {
                    Selection::None => self.first_row(),
                    Selection::Null => self.tree.first_visible().map(Selection::Node),
                    Selection::Node(id) => self.tree.next_visible(id).map(Selection::Node),
                };
                if let Some(next) = next {
                    self.tree.select(next);
                }
            }
        }
    }

    /// Move to the previous row
    pub fn move_up(&mut self) {
        match self.mode {
            Mode::Searching => self.move_cursor(self.cursor.saturating_sub(1)),
            Mode::Browsing => {
                let prev = match self.tree.selection() {
                    Selection::None => self.first_row(),
                    Selection::Null => None,
                    Selection::Node(id) => self
                        .tree
                        .prev_visible(id)
                        .map(Selection::Node)
                        .or_else(|| self.tree.null_label().map(|_| Selection::Null)),
                };
                if let Some(prev) = prev {
                    self.tree.select(prev);
                }
            }
        }
    }

    /// Jump to the first row
    pub fn move_first(&mut self) {
        match self.mode {
            Mode::Searching => self.move_cursor(0),
            Mode::Browsing => {
                if let Some(first) = self.first_row() {
                    self.tree.select(first);
                }
            }
        }
    }

    /// Jump to the last row
    pub fn move_last(&mut self) {
        match self.mode {
            Mode::Searching => self.move_cursor(self.results.len().saturating_sub(1)),
            Mode::Browsing => {
                let last = self
                    .tree
                    .last_visible()
                    .map(Selection::Node)
                    .or_else(|| self.first_row());
                if let Some(last) = last {
                    self.tree.select(last);
                }
            }
        }
    }

    fn move_cursor(&mut self, position: usize) {
        let Some(last) = self.results.len().checked_sub(1) else {
            return;
        };
        self.cursor = position.min(last);
        let id = self.results[self.cursor].id;
        self.tree.select(Selection::Node(id));
        // Keep the target reachable once the query is cleared
        self.tree.expand_ancestors(id);
    }

    fn result_position(&self, target: Selection) -> Option<usize> {
        self.results
            .iter()
            .position(|leaf| Selection::Node(leaf.id) == target)
    }

    fn first_row(&self) -> Option<Selection> {
        self.tree
            .null_label()
            .map(|_| Selection::Null)
            .or_else(|| self.tree.first_visible().map(Selection::Node))
    }

    /// Expand the selected folder, or step into it when already open
    ///
    /// Returns false when nothing changed.
    pub fn expand_selected(&mut self) -> bool {
        let Some(id) = self.browsing_folder() else {
            return false;
        };
        if self.tree.is_expanded(id) {
            match self.tree.children(id).first() {
                Some(&child) => {
                    self.tree.select(Selection::Node(child));
                    true
                }
                None => false,
            }
        } else {
            self.tree.set_expanded(id, true);
            true
        }
    }

    /// Collapse the selected folder, or step out to the parent folder
    ///
    /// Returns false when nothing changed.
    pub fn collapse_selected(&mut self) -> bool {
        if self.mode != Mode::Browsing {
            return false;
        }
        let Some(id) = self.tree.selection().node() else {
            return false;
        };
        if self.tree.is_folder(id) && self.tree.is_expanded(id) {
            self.tree.set_expanded(id, false);
            return true;
        }
        match self.tree.parent(id) {
            Some(parent) if parent != self.tree.root() => {
                self.tree.select(Selection::Node(parent));
                true
            }
            _ => false,
        }
    }

    fn browsing_folder(&self) -> Option<NodeId> {
        if self.mode != Mode::Browsing {
            return None;
        }
        self.tree
            .selection()
            .node()
            .filter(|&id| self.tree.is_folder(id))
    }

    /// The row Enter acts upon
    pub(super) fn activation_target(&self) -> Selection {
        match self.mode {
            Mode::Searching => self
                .results
                .get(self.cursor)
                .map_or(Selection::None, |leaf| Selection::Node(leaf.id)),
            Mode::Browsing => self.tree.selection(),
        }
    }

    /// Toggle a folder's expand state
    pub fn toggle_folder(&mut self, id: NodeId) {
        self.tree.toggle_expanded(id);
    }

    /// Append a character to the query
    ///
    /// Returns false when searching is disabled for this session.
    pub fn push_char(&mut self, c: char) -> bool {
        if !self.search_enabled() {
            return false;
        }
        self.query.push(c);
        self.refresh_query(false);
        true
    }

    /// Remove the last query character; false if the query was empty
    pub fn pop_char(&mut self) -> bool {
        if self.query.pop().is_none() {
            return false;
        }
        self.refresh_query(true);
        true
    }

    /// Clear the query; false if it was already empty
    pub fn clear_query(&mut self) -> bool {
        if self.query.is_empty() {
            return false;
        }
        self.query.clear();
        self.refresh_query(true);
        true
    }

    /// Replace the whole query
    pub fn set_query(&mut self, query: &str) {
        if query == self.query || (!query.is_empty() && !self.search_enabled()) {
            return;
        }
        self.query = query.to_string();
        self.refresh_query(false);
    }

    /// Recompute mode and results after a query edit
    ///
    /// A whitespace-only query counts as empty. With `keep_selection` a
    /// selected leaf that still matches stays selected; otherwise the best
    /// match is. Folders are only opened again when browsing resumes.
    fn refresh_query(&mut self, keep_selection: bool) {
        if self.query.trim().is_empty() {
            self.mode = Mode::Browsing;
            self.results.clear();
            self.cursor = 0;
            self.reveal_selection();
            debug!("query cleared, back to browsing");
            return;
        }

        self.mode = Mode::Searching;
        self.results = self
            .tree
            .filter_by_query(&self.query, self.matcher.as_mut());
        let kept = keep_selection
            .then(|| self.result_position(self.tree.selection()))
            .flatten();
        match kept {
            Some(position) => self.cursor = position,
            None => {
                self.cursor = 0;
                if let Some(best) = self.results.first() {
                    self.tree.select(Selection::Node(best.id));
                }
            }
        }
        debug!(query = %self.query, matches = self.results.len(), "query updated");
    }

    /// Make the selection visible in browsing mode, or pick the first row
    fn reveal_selection(&mut self) {
        match self.tree.selection() {
            Selection::Node(id) => self.tree.expand_ancestors(id),
            Selection::Null => {}
            Selection::None => {
                if let Some(first) = self.first_row() {
                    self.tree.select(first);
                }
            }
        }
    }
}

impl<V: PartialEq> Picker<V> {
    /// Preselect the leaf holding `value` and reveal it
    ///
    /// Returns false if no leaf holds the value.
    pub fn select_value(&mut self, value: &V) -> bool {
        match self.tree.find_value(value) {
            Some(id) => {
                self.select(Selection::Node(id));
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::WordStartMatcher;
    use crate::testing::sample_tree;

    fn picker(options: PickerOptions) -> Picker<String> {
        Picker::new(sample_tree(true), Box::new(WordStartMatcher), options)
    }

    fn searchable() -> PickerOptions {
        PickerOptions {
            search_min_items: 0,
            expand_all: false,
        }
    }

    fn selected_path(picker: &Picker<String>) -> Option<String> {
        picker.selection().node().map(|id| picker.tree().path_of(id))
    }

    #[test]
    fn test_initial_selection_is_null_row() {
        let picker = picker(searchable());
        assert_eq!(picker.selection(), Selection::Null);
        assert_eq!(picker.selected_row(), Some(0));
        assert_eq!(picker.mode(), Mode::Browsing);
    }

    #[test]
    fn test_browsing_rows_follow_expand_state() {
        let mut picker = picker(searchable());
        let collapsed = picker.rows().len();

        picker.move_down();
        assert!(picker.expand_selected());
        assert!(picker.rows().len() > collapsed);

        assert!(picker.collapse_selected());
        assert_eq!(picker.rows().len(), collapsed);
    }

    #[test]
    fn test_typing_enters_searching_and_selects_best() {
        let mut picker = picker(searchable());
        for c in "GL".chars() {
            assert!(picker.push_char(c));
        }

        assert_eq!(picker.mode(), Mode::Searching);
        assert!(!picker.results().is_empty());
        assert_eq!(picker.selected_row(), Some(0));

        let best = picker.results()[0].id;
        assert_eq!(picker.selection(), Selection::Node(best));
        // the short root-level type beats the deeply namespaced loggers
        assert_eq!(
            picker.selected_value().map(String::as_str),
            Some("GlobalSettings")
        );
    }

    #[test]
    fn test_clearing_query_reveals_selection() {
        let mut picker = picker(searchable());
        picker.set_query("GreetingLogger");
        let target = picker.selection().node().unwrap();

        picker.clear_query();
        assert_eq!(picker.mode(), Mode::Browsing);
        assert_eq!(picker.selection(), Selection::Node(target));
        assert!(picker.tree().is_visible(target));
        assert!(picker.selected_row().is_some());
    }

    #[test]
    fn test_deleting_keeps_a_still_matching_selection() {
        let mut picker = picker(searchable());
        picker.set_query("PQ");
        let reached = picker.selection();
        assert_eq!(
            picker.selected_value().map(String::as_str),
            Some("Utils.Collections.PriorityQueue")
        );

        assert!(picker.pop_char());
        assert_eq!(picker.query(), "P");
        assert_eq!(picker.selection(), reached);
        assert_eq!(picker.rows()[picker.selected_row().unwrap()].target, reached);

        assert!(picker.pop_char());
        assert_eq!(picker.mode(), Mode::Browsing);
        assert_eq!(picker.selection(), reached);
    }

    #[test]
    fn test_typing_does_not_open_folders() {
        let mut picker = picker(searchable());
        let top = |picker: &Picker<String>, name: &str| {
            picker.tree().find_child(picker.tree().root(), name).unwrap()
        };

        picker.set_query("GreetingLogger");
        assert!(!picker.tree().is_expanded(top(&picker, "Game")));

        picker.set_query("PQ");
        assert!(picker.clear_query());

        // only the path to the final selection is opened
        assert!(picker.tree().is_expanded(top(&picker, "Utils")));
        assert!(!picker.tree().is_expanded(top(&picker, "Game")));
    }

    #[test]
    fn test_whitespace_query_stays_browsing() {
        let mut picker = picker(searchable());
        assert!(picker.push_char(' '));

        assert_eq!(picker.query(), " ");
        assert_eq!(picker.mode(), Mode::Browsing);
        assert!(picker.results().is_empty());
        assert_eq!(picker.selected_row(), Some(0));

        picker.move_down();
        assert!(matches!(picker.selection(), Selection::Node(_)));
    }

    #[test]
    fn test_select_outside_results_returns_to_browsing() {
        let mut picker = picker(searchable());
        picker.set_query("PQ");
        let music = picker
            .tree()
            .leaves()
            .find(|&id| picker.tree().path_of(id) == "Audio/MusicPlayer")
            .unwrap();

        picker.select(Selection::Node(music));
        assert_eq!(picker.mode(), Mode::Browsing);
        assert!(picker.query().is_empty());
        assert_eq!(picker.activation_target(), Selection::Node(music));
        assert!(picker.tree().is_visible(music));
    }

    #[test]
    fn test_search_disabled_below_threshold() {
        let mut picker = picker(PickerOptions {
            search_min_items: 1000,
            expand_all: false,
        });
        assert!(!picker.search_enabled());
        assert!(!picker.push_char('a'));
        assert!(picker.query().is_empty());
    }

    #[test]
    fn test_select_value_expands_ancestors() {
        let mut picker = picker(searchable());
        assert!(picker.select_value(&"Game.Loggers.AnotherLogger".to_string()));
        assert_eq!(
            selected_path(&picker).as_deref(),
            Some("Game/Loggers/AnotherLogger")
        );
        let id = picker.selection().node().unwrap();
        assert!(picker.tree().is_visible(id));
        assert!(!picker.select_value(&"Nope".to_string()));
    }

    #[test]
    fn test_expand_all_option() {
        let picker = picker(PickerOptions {
            search_min_items: 0,
            expand_all: true,
        });
        let visible = picker.rows().len();
        // null row plus every node
        assert_eq!(visible, picker.tree().len());
    }

    #[test]
    fn test_move_up_from_first_node_reaches_null_row() {
        let mut picker = picker(searchable());
        picker.move_down();
        assert!(matches!(picker.selection(), Selection::Node(_)));
        picker.move_up();
        assert_eq!(picker.selection(), Selection::Null);
        picker.move_up();
        assert_eq!(picker.selection(), Selection::Null);
    }

    #[test]
    fn test_move_last_and_first() {
        let mut picker = picker(PickerOptions {
            search_min_items: 0,
            expand_all: true,
        });
        picker.move_last();
        let rows = picker.rows();
        assert_eq!(picker.selected_row(), Some(rows.len() - 1));

        picker.move_first();
        assert_eq!(picker.selection(), Selection::Null);
    }
}
