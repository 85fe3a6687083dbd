//! Command implementations
//!
//! Each command is a module with an execute function that takes parsed CLI
//! args and the effective configuration.

pub mod completions;
pub mod filter;
pub mod pick;
pub mod tree;

pub use completions::execute as completions;
pub use filter::execute as filter;
pub use pick::execute as pick;
pub use tree::execute as tree;

use crate::catalog::Catalog;
use crate::cli::SourceArgs;
use crate::config::PickConfig;
use crate::Result;
use std::io;
use tracing::info;

/// Read the type names a command works on
///
/// # Errors
///
/// Returns an error if a filter pattern is invalid or the input cannot be read.
pub fn load_catalog(source: &SourceArgs, config: &PickConfig) -> Result<Catalog> {
    let options = config.catalog_options()?;
    let catalog = match source.input() {
        Some(path) => Catalog::from_path(path, &options)?,
        None => Catalog::from_reader(io::stdin().lock(), &options)?,
    };
    info!(count = catalog.len(), "catalog loaded");
    Ok(catalog)
}
