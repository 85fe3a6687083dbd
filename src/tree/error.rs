//! Tree construction errors
//!
//! Both variants leave the tree exactly as it was before the failed insert.

use thiserror::Error;

/// Errors returned by [`PathTree::insert`](super::PathTree::insert)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// A node with the same name already exists at the leaf position
    #[error("path '{path}' is already occupied")]
    DuplicatePath {
        /// Full path that was being inserted
        path: String,
    },

    /// A folder component of the path names an existing leaf
    #[error("path '{path}' descends through leaf '{component}'")]
    PathThroughLeaf {
        /// Full path that was being inserted
        path: String,
        /// The component that resolved to a leaf
        component: String,
    },
}
