//! Preorder traversal

use super::{NodeId, PathTree};

/// Lazy preorder walk over the descendants of a node
///
/// Created by [`PathTree::enumerate`] and [`PathTree::visible`]. The walk
/// borrows the tree, so the tree cannot change underneath it; calling the
/// constructor again restarts from the beginning.
pub struct Preorder<'a, V> {
    tree: &'a PathTree<V>,
    stack: Vec<(NodeId, usize)>,
    only_expanded: bool,
}

impl<'a, V> Preorder<'a, V> {
    pub(super) fn new(tree: &'a PathTree<V>, start: NodeId, only_expanded: bool) -> Self {
        let mut walk = Self {
            tree,
            stack: Vec::new(),
            only_expanded,
        };
        walk.push_children(start, 0);
        walk
    }

    fn push_children(&mut self, id: NodeId, depth: usize) {
        self.stack
            .extend(self.tree.children(id).iter().rev().map(|&child| (child, depth)));
    }
}

impl<V> Iterator for Preorder<'_, V> {
    /// Node handle and depth relative to the start node (direct children are 0)
    type Item = (NodeId, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let (id, depth) = self.stack.pop()?;
        if !self.only_expanded || self.tree.is_expanded(id) {
            self.push_children(id, depth + 1);
        }
        Some((id, depth))
    }
}
