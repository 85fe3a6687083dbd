//! Filter command - rank type names against a query without a UI

use crate::catalog::Catalog;
use crate::matcher::{MatchScore, MatcherKind};
use crate::Result;
use colored::Colorize;
use serde::Serialize;

/// One ranked match
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterMatch {
    pub value: String,
    /// Tree path under the active grouping
    pub path: String,
    pub score: MatchScore,
}

/// Matches for `query`, best first, at most `limit` of them
#[must_use]
pub fn matches(
    catalog: &Catalog,
    query: &str,
    matcher: MatcherKind,
    limit: Option<usize>,
) -> Vec<FilterMatch> {
    let (tree, _) = catalog.build_tree(None);
    let mut matcher = matcher.build();

    tree.filter_by_query(query, matcher.as_mut())
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .filter_map(|leaf| {
            Some(FilterMatch {
                value: tree.value(leaf.id)?.clone(),
                path: tree.path_of(leaf.id),
                score: leaf.score,
            })
        })
        .collect()
}

/// Execute the filter command
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn execute(
    catalog: &Catalog,
    query: &str,
    matcher: MatcherKind,
    limit: Option<usize>,
    json: bool,
    quiet: bool,
) -> Result<()> {
    let found = matches(catalog, query, matcher, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&found)?);
        return Ok(());
    }

    if found.is_empty() {
        if !quiet {
            eprintln!("No matches for '{query}'.");
        }
        return Ok(());
    }

    for m in &found {
        if quiet {
            println!("{}", m.value);
        } else {
            println!("{:>5}  {}", m.score.to_string().dimmed(), m.value.green());
        }
    }
    Ok(())
}
