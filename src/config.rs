//! Configuration module for typepick
//!
//! Picker defaults are read from `<config_dir>/typepick/config.toml`, then
//! overridden by `TYPEPICK_*` environment variables. A missing file simply
//! means defaults.
//!
//! ```toml
//! grouping = "by-namespace"
//! include_none = true
//! search_min_items = 10
//! matcher = "word-start"
//! exclude = ["System.*"]
//!
//! [keybinds]
//! move_down = ["down", "ctrl-j"]
//! clear_query = "none"
//! ```

use crate::catalog::{CatalogError, CatalogFilter, CatalogOptions, Grouping};
use crate::keybinds::KeybindConfig;
use crate::matcher::MatcherKind;
use crate::picker::{DEFAULT_SEARCH_MIN_ITEMS, PickerOptions};
use config::{Config, ConfigError, Environment, File, FileFormat, Map};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Prefix of environment variables that override file values
pub const ENV_PREFIX: &str = "TYPEPICK";

/// Default popup height as a share of the terminal height
pub const DEFAULT_MAX_HEIGHT_RATIO: f32 = 0.6;

/// Application configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PickConfig {
    /// Tree layout of type names
    pub grouping: Grouping,

    /// Show bare type names when `grouping` is `none`
    pub short_names: bool,

    /// Offer a "no value" entry at the top of the tree
    pub include_none: bool,

    /// Label of the "no value" entry
    pub null_label: String,

    /// Start with every folder open
    pub expand_all: bool,

    /// Typing is disabled below this many candidates
    pub search_min_items: usize,

    pub matcher: MatcherKind,

    /// Maximum popup height as a share of the terminal, in `(0, 1]`
    pub max_height_ratio: f32,

    /// Glob patterns a type name must match to be listed
    pub include: Vec<String>,

    /// Glob patterns that hide a type name
    pub exclude: Vec<String>,

    pub keybinds: KeybindConfig,
}

impl Default for PickConfig {
    fn default() -> Self {
        Self {
            grouping: Grouping::default(),
            short_names: false,
            include_none: true,
            null_label: "(None)".to_string(),
            expand_all: false,
            search_min_items: DEFAULT_SEARCH_MIN_ITEMS,
            matcher: MatcherKind::default(),
            max_height_ratio: DEFAULT_MAX_HEIGHT_RATIO,
            include: Vec::new(),
            exclude: Vec::new(),
            keybinds: KeybindConfig::default(),
        }
    }
}

impl PickConfig {
    /// Get the path to the config file
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the system config directory cannot be determined.
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| ConfigError::Message("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("typepick").join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be parsed, an environment
    /// override has the wrong type, or a value is out of range.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with_env(path, None)
    }

    /// Load configuration, reading overrides from `env` instead of the
    /// process environment when it is given
    ///
    /// # Errors
    ///
    /// Same as [`load`](Self::load).
    pub fn load_with_env(
        path: Option<&Path>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, ConfigError> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::config_path()?,
        };
        debug!(path = %config_path.display(), "loading config");

        let settings = Config::builder()
            .add_source(
                File::from(config_path)
                    .format(FileFormat::Toml)
                    .required(false),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .source(env),
            )
            .build()?;

        let config: Self = settings.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to `path`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the directory cannot be created, the
    /// configuration cannot be serialized to TOML, or the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::Message(format!("Failed to create config directory: {e}")))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Message(format!("Failed to serialize config: {e}")))?;

        fs::write(path, toml_string)
            .map_err(|e| ConfigError::Message(format!("Failed to write config file: {e}")))?;

        Ok(())
    }

    /// Check value ranges
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Message` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.max_height_ratio > 0.0 && self.max_height_ratio <= 1.0) {
            return Err(ConfigError::Message(format!(
                "max_height_ratio must be in (0, 1], got {}",
                self.max_height_ratio
            )));
        }
        if let Some(name) = self.keybinds.unknown_actions().first() {
            return Err(ConfigError::Message(format!("Unknown keybind action '{name}'")));
        }
        Ok(())
    }

    /// Catalog options described by this configuration
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidPattern` for a bad include/exclude glob.
    pub fn catalog_options(&self) -> Result<CatalogOptions, CatalogError> {
        Ok(CatalogOptions {
            grouping: self.grouping,
            short_names: self.short_names,
            filter: CatalogFilter::new(&self.include, &self.exclude)?,
        })
    }

    #[must_use]
    pub const fn picker_options(&self) -> PickerOptions {
        PickerOptions {
            search_min_items: self.search_min_items,
            expand_all: self.expand_all,
        }
    }

    /// Label for the "no value" entry, if it is enabled
    #[must_use]
    pub fn null_label(&self) -> Option<&str> {
        self.include_none.then_some(self.null_label.as_str())
    }
}
