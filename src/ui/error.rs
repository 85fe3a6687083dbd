//! UI error types

use thiserror::Error;

/// Errors that can occur in UI operations
#[derive(Debug, Error)]
pub enum UiError {
    /// A configured key string could not be parsed
    #[error("Invalid key '{key}' bound to '{action}'")]
    InvalidKeybind { action: String, key: String },

    /// Stderr, where the popup is drawn, is not attached to a terminal
    #[error("Interactive picking needs a terminal on stderr")]
    NotATerminal,

    /// IO error during UI operations
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type for UI operations
pub type Result<T> = std::result::Result<T, UiError>;
