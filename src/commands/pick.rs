//! Pick command - run the interactive picker

use crate::catalog::Catalog;
use crate::config::PickConfig;
use crate::picker::{Picker, SessionOutcome};
use crate::ui::TerminalPicker;
use crate::{PickError, Result};
use tracing::{info, warn};

/// Printed when the "no value" entry is picked
pub const NONE_OUTPUT: &str = "<none>";

/// Session setup beyond the configuration
#[derive(Debug, Clone, Default)]
pub struct PickRequest {
    /// Type name to preselect
    pub select: Option<String>,
    /// Query typed in before the first frame
    pub query: Option<String>,
}

/// Build the session for `catalog`
///
/// # Errors
///
/// Returns [`PickError::InvalidInput`] if the catalog is empty.
pub fn prepare(
    catalog: &Catalog,
    config: &PickConfig,
    request: &PickRequest,
) -> Result<Picker<String>> {
    if catalog.is_empty() {
        return Err(PickError::InvalidInput("no type names to pick from".into()));
    }

    let (tree, rejected) = catalog.build_tree(config.null_label());
    if !rejected.is_empty() {
        warn!(count = rejected.len(), "some type names were skipped");
    }

    let mut picker = Picker::new(tree, config.matcher.build(), config.picker_options());

    if let Some(name) = &request.select
        && !picker.select_value(name)
    {
        warn!(%name, "preselected type not found");
    }
    if let Some(query) = &request.query {
        picker.set_query(query);
    }

    Ok(picker)
}

/// Text printed for a finished session, `None` when cancelled
#[must_use]
pub fn outcome_text(outcome: &SessionOutcome<String>) -> Option<&str> {
    match outcome {
        SessionOutcome::Finalized(Some(value)) => Some(value.as_str()),
        SessionOutcome::Finalized(None) => Some(NONE_OUTPUT),
        SessionOutcome::Cancelled | SessionOutcome::Pending => None,
    }
}

/// Execute the pick command
///
/// Returns false when the user cancelled.
///
/// # Errors
///
/// Returns an error if the catalog is empty, a keybind is invalid, or the
/// terminal cannot be driven.
pub fn execute(catalog: &Catalog, config: &PickConfig, request: &PickRequest) -> Result<bool> {
    let mut picker = prepare(catalog, config, request)?;
    let ui = TerminalPicker::from_config(config)?;

    let outcome = ui.run(&mut picker)?;
    info!(picked = outcome_text(&outcome).unwrap_or("<cancelled>"), "pick finished");

    match outcome_text(&outcome) {
        Some(text) => {
            println!("{text}");
            Ok(true)
        }
        None => Ok(false),
    }
}
