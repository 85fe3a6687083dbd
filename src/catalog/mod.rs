//! Candidate registration
//!
//! A [`Catalog`] is the list of `(display_path, search_key, value)` records a
//! tree is built from. Records are produced from fully qualified type names:
//! the [`Grouping`] decides the display path, the search key is the full
//! name, and the value is the full name as given.
//!
//! Name lists are plain text, one name per line; blank lines and lines
//! starting with `#` are ignored:
//!
//! ```text
//! # gameplay
//! Game.Loggers.GreetingLogger
//! Game.Loggers.AnotherLogger
//! GlobalSettings
//! ```

mod filter;
mod grouping;

pub use filter::CatalogFilter;
pub use grouping::{Grouping, NAMESPACE_SEPARATOR, NESTED_SEPARATOR, TypeName, search_key};

use crate::tree::{PathTree, TreeError};
use std::collections::HashSet;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors raised while assembling a catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Reading the name list failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An include or exclude pattern is not a valid glob
    #[error("Invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
}

/// One registered candidate
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    /// Slash-delimited tree path
    pub display_path: String,
    /// Unformatted key for fuzzy matching
    pub search_key: String,
    /// Value delivered when this entry is picked
    pub value: String,
}

/// How names become entries
#[derive(Debug, Clone, Default)]
pub struct CatalogOptions {
    pub grouping: Grouping,
    /// Show only the type's own name under [`Grouping::None`]
    pub short_names: bool,
    pub filter: CatalogFilter,
}

/// Ordered set of candidates
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<CatalogEntry>,
}

impl Catalog {
    /// Build a catalog from type names
    ///
    /// Names are trimmed; blanks, `#` comments, repeats and filtered names are
    /// dropped. Entries come out sorted case-insensitively by display path.
    pub fn from_names<I, S>(names: I, options: &CatalogOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut entries: Vec<CatalogEntry> = names
            .into_iter()
            .filter_map(|raw| {
                let name = raw.as_ref().trim();
                if name.is_empty() || name.starts_with('#') {
                    return None;
                }
                if !options.filter.allows(name) {
                    debug!(name, "filtered out");
                    return None;
                }
                if !seen.insert(name.to_string()) {
                    return None;
                }
                Some(CatalogEntry {
                    display_path: options.grouping.display_path(name, options.short_names),
                    search_key: search_key(name),
                    value: name.to_string(),
                })
            })
            .collect();

        entries.sort_by_cached_key(|entry| entry.display_path.to_lowercase());
        debug!(count = entries.len(), "catalog assembled");
        Self { entries }
    }

    /// Read one name per line
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if reading fails.
    pub fn from_reader<R: BufRead>(reader: R, options: &CatalogOptions) -> Result<Self, CatalogError> {
        let lines = reader.lines().collect::<io::Result<Vec<String>>>()?;
        Ok(Self::from_names(lines, options))
    }

    /// Read a name list file
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be opened or read.
    pub fn from_path(path: &Path, options: &CatalogOptions) -> Result<Self, CatalogError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file), options)
    }

    #[must_use]
    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build the tree, optionally with a "no value" entry
    ///
    /// Entries that collide with an earlier one are skipped and returned
    /// alongside the tree.
    #[must_use]
    pub fn build_tree(&self, null_label: Option<&str>) -> (PathTree<String>, Vec<TreeError>) {
        let mut tree = null_label.map_or_else(PathTree::new, PathTree::with_null_item);
        let mut rejected = Vec::new();

        for entry in &self.entries {
            if let Err(err) = tree.insert(
                &entry.display_path,
                entry.search_key.clone(),
                entry.value.clone(),
            ) {
                warn!(value = %entry.value, "skipping entry: {err}");
                rejected.push(err);
            }
        }

        (tree, rejected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::SAMPLE_TYPES;

    #[test]
    fn test_from_names_sorts_and_skips() {
        let names = ["# comment", "", "  Zeta.B  ", "alpha.A", "Zeta.B"];
        let catalog = Catalog::from_names(names, &CatalogOptions::default());

        let paths: Vec<_> = catalog
            .entries()
            .iter()
            .map(|e| e.display_path.as_str())
            .collect();
        assert_eq!(paths, vec!["alpha/A", "Zeta/B"]);
        assert_eq!(catalog.entries()[1].value, "Zeta.B");
    }

    #[test]
    fn test_from_reader() {
        let input = "Game.Player\n# skip\nAudio.Music\n";
        let catalog = Catalog::from_reader(input.as_bytes(), &CatalogOptions::default()).unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.entries()[0].display_path, "Audio/Music");
    }

    #[test]
    fn test_filter_applies() {
        let options = CatalogOptions {
            filter: CatalogFilter::new(&[], &["Game.*".to_string()]).unwrap(),
            ..CatalogOptions::default()
        };
        let catalog = Catalog::from_names(SAMPLE_TYPES, &options);
        assert!(catalog.entries().iter().all(|e| !e.value.starts_with("Game.")));
        assert!(!catalog.is_empty());
    }

    #[test]
    fn test_build_tree_with_null_item() {
        let catalog = Catalog::from_names(SAMPLE_TYPES, &CatalogOptions::default());
        let (tree, rejected) = catalog.build_tree(Some("(None)"));

        assert!(rejected.is_empty());
        assert_eq!(tree.null_label(), Some("(None)"));
        assert_eq!(tree.leaf_count(), SAMPLE_TYPES.len());
    }

    #[test]
    fn test_short_name_collisions_are_reported() {
        let options = CatalogOptions {
            grouping: Grouping::None,
            short_names: true,
            ..CatalogOptions::default()
        };
        let catalog = Catalog::from_names(["A.Logger", "B.Logger"], &options);
        let (tree, rejected) = catalog.build_tree(None);

        assert_eq!(tree.leaf_count(), 1);
        assert_eq!(
            rejected,
            vec![TreeError::DuplicatePath {
                path: "Logger".to_string()
            }]
        );
    }
}
