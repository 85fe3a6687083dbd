//! Tree command - print the type hierarchy

use crate::catalog::Catalog;
use crate::tree::{NodeId, PathTree};
use colored::Colorize;

/// One printed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeLine {
    /// Box-drawing connectors
    pub prefix: String,
    pub name: String,
    pub is_folder: bool,
}

impl TreeLine {
    #[must_use]
    pub fn plain(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

fn is_last_child<V>(tree: &PathTree<V>, id: NodeId) -> bool {
    tree.parent(id)
        .is_none_or(|parent| tree.children(parent).last() == Some(&id))
}

/// Lay out every node of `tree` with connectors
#[must_use]
pub fn render<V>(tree: &PathTree<V>) -> Vec<TreeLine> {
    tree.enumerate(tree.root())
        .map(|(id, _)| {
            // ancestors below the root, nearest first
            let ancestors: Vec<NodeId> =
                std::iter::successors(tree.parent(id), |&a| tree.parent(a))
                    .filter(|&a| a != tree.root())
                    .collect();

            let mut prefix: String = ancestors
                .iter()
                .rev()
                .map(|&a| if is_last_child(tree, a) { "    " } else { "│   " })
                .collect();
            prefix.push_str(if is_last_child(tree, id) { "└── " } else { "├── " });

            TreeLine {
                prefix,
                name: tree.node(id).name().to_string(),
                is_folder: tree.is_folder(id),
            }
        })
        .collect()
}

/// Execute the tree command
pub fn execute(catalog: &Catalog, quiet: bool) {
    let (tree, rejected) = catalog.build_tree(None);

    for line in render(&tree) {
        if line.is_folder {
            println!("{}{}", line.prefix.dimmed(), line.name.blue().bold());
        } else {
            println!("{}{}", line.prefix.dimmed(), line.name);
        }
    }

    if !quiet {
        println!(
            "\n{} types, {} skipped",
            tree.leaf_count().to_string().green(),
            rejected.len()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_tree;

    #[test]
    fn test_render_connectors() {
        let mut tree: PathTree<u32> = PathTree::new();
        tree.insert("A/B/C", "C", 1).unwrap();
        tree.insert("A/B/D", "D", 2).unwrap();
        tree.insert("E", "E", 3).unwrap();

        let lines: Vec<String> = render(&tree).iter().map(TreeLine::plain).collect();
        assert_eq!(
            lines,
            vec![
                "├── A",
                "│   └── B",
                "│       ├── C",
                "│       └── D",
                "└── E",
            ]
        );
    }

    #[test]
    fn test_render_sample_order() {
        let lines = render(&sample_tree(false));

        assert_eq!(lines[0].name, "Audio");
        assert!(lines[0].is_folder);
        assert_eq!(lines.iter().filter(|l| !l.is_folder).count(), 11);
        assert_eq!(lines.last().map(|l| l.name.as_str()), Some("PriorityQueue"));
    }
}
