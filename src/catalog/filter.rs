//! Include/exclude filtering of type names

use super::CatalogError;
use glob::Pattern;

/// Glob-based include/exclude rules
///
/// A name passes when it matches no exclude pattern and, if any include
/// patterns exist, at least one of them. Exclusion always wins.
#[derive(Debug, Clone, Default)]
pub struct CatalogFilter {
    include: Vec<Pattern>,
    exclude: Vec<Pattern>,
}

fn compile(patterns: &[String]) -> Result<Vec<Pattern>, CatalogError> {
    patterns
        .iter()
        .map(|pattern| {
            Pattern::new(pattern).map_err(|source| CatalogError::InvalidPattern {
                pattern: pattern.clone(),
                source,
            })
        })
        .collect()
}

impl CatalogFilter {
    /// Compile include and exclude patterns
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPattern`] for the first pattern that
    /// does not parse.
    pub fn new(include: &[String], exclude: &[String]) -> Result<Self, CatalogError> {
        Ok(Self {
            include: compile(include)?,
            exclude: compile(exclude)?,
        })
    }

    /// True when the filter lets everything through
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.include.is_empty() && self.exclude.is_empty()
    }

    /// Whether `full_name` passes the filter
    #[must_use]
    pub fn allows(&self, full_name: &str) -> bool {
        if self.exclude.iter().any(|p| p.matches(full_name)) {
            return false;
        }
        self.include.is_empty() || self.include.iter().any(|p| p.matches(full_name))
    }
}
