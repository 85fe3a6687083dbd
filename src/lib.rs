//! Typepick - a hierarchical type picker with word-start fuzzy search
//!
//! This library provides a path tree of candidates, a fuzzy matcher that
//! favours word starts, and a keyboard-driven picker session over both.
//! A terminal front end and a CLI are built on top.

use thiserror::Error;

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod keybinds;
pub mod logging;
pub mod matcher;
pub mod picker;
pub mod tree;
pub mod ui;

#[cfg(test)]
pub mod testing;

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum PickError {
    /// Tree construction error
    #[error("Tree error: {0}")]
    Tree(#[from] tree::TreeError),
    /// Catalog error
    #[error("Catalog error: {0}")]
    Catalog(#[from] catalog::CatalogError),
    /// Terminal UI error
    #[error("UI error: {0}")]
    Ui(#[from] ui::UiError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
    /// Represents an I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Output serialization error
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, PickError>;
