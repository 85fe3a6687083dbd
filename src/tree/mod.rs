//! Folder/leaf hierarchy built from slash-delimited paths
//!
//! Inserting `"Game/Loggers/GreetingLogger"` creates (or reuses) the folders
//! `Game` and `Game/Loggers` and hangs a leaf named `GreetingLogger` under the
//! latter:
//!
//! ```text
//! <root>
//! └── Game
//!     └── Loggers
//!         ├── GreetingLogger
//!         └── AnotherLogger
//! ```
//!
//! Nodes live in an arena and refer to each other by [`NodeId`]. Expand state
//! and the current selection are kept beside the arena, so toggling a folder
//! or moving the selection never touches node payloads.

mod error;
mod iter;
mod node;

pub use error::TreeError;
pub use iter::Preorder;
pub use node::{NodeId, NodeKind, TreeNode};

use crate::matcher::{MatchScore, Matcher};

/// Separator between path components
pub const PATH_SEPARATOR: char = '/';

const ROOT: NodeId = NodeId(0);

/// What is currently selected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    /// Nothing selected
    #[default]
    None,
    /// The synthetic "no value" entry
    Null,
    /// A folder or leaf
    Node(NodeId),
}

impl Selection {
    /// The selected node, if the selection is a node
    #[must_use]
    pub const fn node(self) -> Option<NodeId> {
        match self {
            Self::Node(id) => Some(id),
            Self::None | Self::Null => None,
        }
    }
}

/// A leaf that survived query filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredLeaf {
    pub id: NodeId,
    pub score: MatchScore,
}

/// Arena-backed path tree
#[derive(Debug, Clone)]
pub struct PathTree<V> {
    nodes: Vec<TreeNode<V>>,
    expanded: Vec<bool>,
    selection: Selection,
    null_label: Option<String>,
}

impl<V> PathTree<V> {
    /// Create an empty tree holding only the synthetic root
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![TreeNode::folder(String::new(), None)],
            // The root is always open so its children are visible
            expanded: vec![true],
            selection: Selection::None,
            null_label: None,
        }
    }

    /// Create an empty tree with a "no value" entry labelled `label`
    #[must_use]
    pub fn with_null_item(label: impl Into<String>) -> Self {
        let mut tree = Self::new();
        tree.null_label = Some(label.into());
        tree
    }

    /// Handle of the synthetic root
    #[must_use]
    pub const fn root(&self) -> NodeId {
        ROOT
    }

    /// Label of the "no value" entry, if the tree has one
    #[must_use]
    pub fn null_label(&self) -> Option<&str> {
        self.null_label.as_deref()
    }

    /// Access a node
    ///
    /// # Panics
    /// Panics if `id` was issued by a different tree.
    #[must_use]
    pub fn node(&self, id: NodeId) -> &TreeNode<V> {
        &self.nodes[id.0]
    }

    /// Access a node, returning `None` for foreign handles
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&TreeNode<V>> {
        self.nodes.get(id.0)
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |node| node.children())
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(TreeNode::parent)
    }

    /// Value of a leaf
    #[must_use]
    pub fn value(&self, id: NodeId) -> Option<&V> {
        self.get(id).and_then(TreeNode::value)
    }

    #[must_use]
    pub fn is_folder(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(TreeNode::is_folder)
    }

    #[must_use]
    pub fn is_leaf(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(TreeNode::is_leaf)
    }

    /// Number of nodes, including the root
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when only the root exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.len() == 1
    }

    /// Number of leaves
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_leaf()).count()
    }

    /// Insert a leaf at `path`
    ///
    /// Folders along the way are reused when a child with the exact same name
    /// exists, and created otherwise. Empty segments (`"A//B"`, `"/B"`) are
    /// kept as empty-named folders.
    ///
    /// # Errors
    ///
    /// Returns [`TreeError::DuplicatePath`] if a node already occupies the leaf
    /// position and [`TreeError::PathThroughLeaf`] if a folder component names
    /// an existing leaf. The tree is unchanged in both cases.
    pub fn insert(
        &mut self,
        path: &str,
        search_key: impl Into<String>,
        value: V,
    ) -> Result<NodeId, TreeError> {
        let (folder_path, leaf_name) = match path.rsplit_once(PATH_SEPARATOR) {
            Some((folders, leaf)) => (Some(folders), leaf),
            None => (None, path),
        };
        let components: Vec<&str> = folder_path
            .map(|folders| folders.split(PATH_SEPARATOR).collect())
            .unwrap_or_default();

        // Resolve the existing prefix first so a failure creates nothing
        let mut parent = ROOT;
        let mut resolved = 0;
        for component in &components {
            match self.find_child(parent, component) {
                Some(child) if self.is_folder(child) => {
                    parent = child;
                    resolved += 1;
                }
                Some(_) => {
                    return Err(TreeError::PathThroughLeaf {
                        path: path.to_string(),
                        component: (*component).to_string(),
                    });
                }
                None => break,
            }
        }

        if resolved == components.len() && self.find_child(parent, leaf_name).is_some() {
            return Err(TreeError::DuplicatePath {
                path: path.to_string(),
            });
        }

        for component in &components[resolved..] {
            parent = self.push(TreeNode::folder((*component).to_string(), Some(parent)));
        }

        Ok(self.push(TreeNode::leaf(
            leaf_name.to_string(),
            parent,
            search_key.into(),
            value,
        )))
    }

    fn push(&mut self, node: TreeNode<V>) -> NodeId {
        let id = NodeId(self.nodes.len());
        if let Some(parent) = node.parent {
            self.nodes[parent.0].children.push(id);
        }
        self.nodes.push(node);
        self.expanded.push(false);
        id
    }

    /// Find a direct child by exact name
    ///
    /// Scans from the most recently added child, since sorted input keeps
    /// reusing the folder that was created last.
    #[must_use]
    pub fn find_child(&self, id: NodeId, name: &str) -> Option<NodeId> {
        self.children(id)
            .iter()
            .rev()
            .copied()
            .find(|&child| self.nodes[child.0].name == name)
    }

    /// Preorder walk over every descendant of `id` (excluding `id` itself)
    ///
    /// `tree.enumerate(tree.root())` visits every node except the root.
    #[must_use]
    pub fn enumerate(&self, id: NodeId) -> Preorder<'_, V> {
        Preorder::new(self, id, false)
    }

    /// Preorder walk that only descends into expanded folders
    #[must_use]
    pub fn visible(&self) -> Preorder<'_, V> {
        Preorder::new(self, ROOT, true)
    }

    /// All leaves in preorder
    pub fn leaves(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.enumerate(ROOT)
            .map(|(id, _)| id)
            .filter(|&id| self.is_leaf(id))
    }

    /// Leaves whose search key matches `query`, best score first
    ///
    /// Equal scores keep preorder order. An empty query yields nothing.
    pub fn filter_by_query<M>(&self, query: &str, matcher: &mut M) -> Vec<ScoredLeaf>
    where
        M: Matcher + ?Sized,
    {
        let mut matches: Vec<ScoredLeaf> = self
            .leaves()
            .filter_map(|id| {
                let key = self.nodes[id.0].search_key()?;
                matcher
                    .score_and_include(query, key)
                    .into_option()
                    .map(|score| ScoredLeaf { id, score })
            })
            .collect();

        // sort_by is stable
        matches.sort_by(|a, b| b.score.cmp(&a.score));
        matches
    }

    /// Current selection
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Replace the selection
    ///
    /// Selecting the root or `Null` on a tree without a null entry clears the
    /// selection instead.
    pub fn select(&mut self, selection: Selection) {
        self.selection = match selection {
            Selection::Node(id) if id == ROOT || self.get(id).is_none() => Selection::None,
            Selection::Null if self.null_label.is_none() => Selection::None,
            other => other,
        };
    }

    #[must_use]
    pub fn is_expanded(&self, id: NodeId) -> bool {
        self.expanded.get(id.0).copied().unwrap_or(false)
    }

    /// Set the expand flag of a folder; ignored for leaves and the root
    pub fn set_expanded(&mut self, id: NodeId, expanded: bool) {
        if id != ROOT && self.is_folder(id) {
            self.expanded[id.0] = expanded;
        }
    }

    /// Flip the expand flag of a folder
    pub fn toggle_expanded(&mut self, id: NodeId) {
        let expanded = self.is_expanded(id);
        self.set_expanded(id, !expanded);
    }

    /// Open every folder between the root and `id`
    pub fn expand_ancestors(&mut self, id: NodeId) {
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            self.set_expanded(ancestor, true);
            current = self.parent(ancestor);
        }
    }

    pub fn expand_all(&mut self) {
        for index in 1..self.nodes.len() {
            self.set_expanded(NodeId(index), true);
        }
    }

    pub fn collapse_all(&mut self) {
        for index in 1..self.nodes.len() {
            self.set_expanded(NodeId(index), false);
        }
    }

    /// True when every ancestor of `id` is expanded
    #[must_use]
    pub fn is_visible(&self, id: NodeId) -> bool {
        if id == ROOT || self.get(id).is_none() {
            return false;
        }
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if !self.is_expanded(ancestor) {
                return false;
            }
            current = self.parent(ancestor);
        }
        true
    }

    /// Next node in expanded-subtree order
    ///
    /// Descends into an expanded folder's first child, otherwise moves to the
    /// next sibling, climbing towards the root when a sibling list runs out.
    #[must_use]
    pub fn next_visible(&self, id: NodeId) -> Option<NodeId> {
        if self.is_expanded(id)
            && let Some(&first) = self.children(id).first()
        {
            return Some(first);
        }

        let mut current = id;
        while let Some(parent) = self.parent(current) {
            if let Some(sibling) = self.next_sibling(parent, current) {
                return Some(sibling);
            }
            current = parent;
        }
        None
    }

    /// Previous node in expanded-subtree order
    #[must_use]
    pub fn prev_visible(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&sibling| sibling == id)?;

        if position == 0 {
            return (parent != ROOT).then_some(parent);
        }

        // Deepest last visible descendant of the previous sibling
        let mut current = siblings[position - 1];
        while self.is_expanded(current)
            && let Some(&last) = self.children(current).last()
        {
            current = last;
        }
        Some(current)
    }

    fn next_sibling(&self, parent: NodeId, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(parent);
        let position = siblings.iter().position(|&sibling| sibling == id)?;
        siblings.get(position + 1).copied()
    }

    /// First visible node, if any
    #[must_use]
    pub fn first_visible(&self) -> Option<NodeId> {
        self.children(ROOT).first().copied()
    }

    /// Last visible node, if any
    #[must_use]
    pub fn last_visible(&self) -> Option<NodeId> {
        let mut current = *self.children(ROOT).last()?;
        while self.is_expanded(current)
            && let Some(&last) = self.children(current).last()
        {
            current = last;
        }
        Some(current)
    }

    /// Depth below the root (children of the root are at depth 0)
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.parent(id);
        while let Some(ancestor) = current {
            if ancestor == ROOT {
                break;
            }
            depth += 1;
            current = self.parent(ancestor);
        }
        depth
    }

    /// Reconstruct the slash-joined path of a node
    #[must_use]
    pub fn path_of(&self, id: NodeId) -> String {
        let mut names = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == ROOT {
                break;
            }
            let node = self.node(node_id);
            names.push(node.name.as_str());
            current = node.parent;
        }
        names.reverse();
        names.join(PATH_SEPARATOR.to_string().as_str())
    }
}

impl<V: PartialEq> PathTree<V> {
    /// First leaf (in preorder) holding `value`
    #[must_use]
    pub fn find_value(&self, value: &V) -> Option<NodeId> {
        self.leaves().find(|&id| self.value(id) == Some(value))
    }
}

impl<V> Default for PathTree<V> {
    fn default() -> Self {
        Self::new()
    }
}
