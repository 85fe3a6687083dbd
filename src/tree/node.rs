//! Arena node types

/// Handle to a node inside one [`PathTree`](super::PathTree)
///
/// Handles are plain indices. They stay valid for the lifetime of the tree
/// that issued them and mean nothing to any other tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(pub(super) usize);

impl NodeId {
    /// Raw arena index
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// Folder or leaf payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind<V> {
    /// Groups children, holds no value
    Folder,
    /// Selectable entry
    Leaf {
        /// Opaque associated value, fixed at insertion
        value: V,
        /// Unformatted key the matcher scores against
        search_key: String,
    },
}

/// A node of the tree
#[derive(Debug, Clone)]
pub struct TreeNode<V> {
    pub(super) name: String,
    pub(super) parent: Option<NodeId>,
    pub(super) children: Vec<NodeId>,
    pub(super) kind: NodeKind<V>,
}

impl<V> TreeNode<V> {
    pub(super) const fn folder(name: String, parent: Option<NodeId>) -> Self {
        Self {
            name,
            parent,
            children: Vec::new(),
            kind: NodeKind::Folder,
        }
    }

    pub(super) const fn leaf(name: String, parent: NodeId, search_key: String, value: V) -> Self {
        Self {
            name,
            parent: Some(parent),
            children: Vec::new(),
            kind: NodeKind::Leaf { value, search_key },
        }
    }

    /// Name of this level only (not the full path)
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Parent handle; `None` only for the synthetic root
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Child handles in insertion order
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Folder or leaf payload
    #[must_use]
    pub const fn kind(&self) -> &NodeKind<V> {
        &self.kind
    }

    #[must_use]
    pub const fn is_folder(&self) -> bool {
        matches!(self.kind, NodeKind::Folder)
    }

    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Value of a leaf
    #[must_use]
    pub const fn value(&self) -> Option<&V> {
        match &self.kind {
            NodeKind::Leaf { value, .. } => Some(value),
            NodeKind::Folder => None,
        }
    }

    /// Search key of a leaf
    #[must_use]
    pub fn search_key(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf { search_key, .. } => Some(search_key),
            NodeKind::Folder => None,
        }
    }
}
