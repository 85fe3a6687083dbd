//! Command-line interface definitions and parsing
//!
//! # Commands
//!
//! - **pick**: Interactive popup; prints the chosen type name
//! - **filter**: Non-interactive ranked matches for a query
//! - **tree**: Print the hierarchy the picker would show
//! - **completions**: Shell completion script
//!
//! Type names are read from FILE, one per line, or from stdin when FILE is
//! omitted or `-`.
//!
//! # Examples
//!
//! ```
//! use clap::Parser;
//! use typepick::cli::{Cli, Commands};
//!
//! let cli = Cli::parse_from(["typepick", "filter", "GL", "types.txt", "--limit", "5"]);
//! assert!(matches!(cli.command, Commands::Filter { limit: Some(5), .. }));
//! ```

use crate::catalog::Grouping;
use crate::config::PickConfig;
use crate::matcher::MatcherKind;
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::{Path, PathBuf};

/// Main CLI structure for parsing command-line arguments
#[derive(Parser, Debug)]
#[command(name = "typepick")]
#[command(about = "Pick a type name from a searchable tree", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: <config dir>/typepick/config.toml)
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log filter such as "debug" or "typepick=trace" (overrides RUST_LOG)
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Suppress informational output (only print results)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Where type names come from and how they are laid out
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceArgs {
    /// File with one type name per line; stdin when omitted or "-"
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Tree layout (overrides config)
    #[arg(short = 'g', long = "grouping", value_enum)]
    pub grouping: Option<Grouping>,

    /// Show bare type names with `--grouping none`
    #[arg(long = "short-names")]
    pub short_names: bool,

    /// Only list names matching this glob (repeatable)
    #[arg(short = 'i', long = "include", value_name = "GLOB")]
    pub include: Vec<String>,

    /// Hide names matching this glob (repeatable)
    #[arg(short = 'e', long = "exclude", value_name = "GLOB")]
    pub exclude: Vec<String>,
}

impl SourceArgs {
    /// Input file, `None` meaning stdin
    #[must_use]
    pub fn input(&self) -> Option<&Path> {
        self.file.as_deref().filter(|path| *path != Path::new("-"))
    }

    /// Layer these flags over the loaded configuration
    pub fn apply(&self, config: &mut PickConfig) {
        if let Some(grouping) = self.grouping {
            config.grouping = grouping;
        }
        config.short_names |= self.short_names;
        config.include.extend(self.include.iter().cloned());
        config.exclude.extend(self.exclude.iter().cloned());
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Open the interactive picker and print the chosen name
    #[command(visible_alias = "p")]
    Pick {
        #[command(flatten)]
        source: SourceArgs,

        /// Preselect this type name
        #[arg(short = 's', long = "select", value_name = "NAME")]
        select: Option<String>,

        /// Start with this query typed in
        #[arg(long = "query", value_name = "QUERY")]
        query: Option<String>,

        /// Leave out the "no value" entry
        #[arg(long = "no-none")]
        no_none: bool,

        /// Start with every folder open
        #[arg(long = "expand-all")]
        expand_all: bool,

        /// Matcher to rank search results with (overrides config)
        #[arg(short = 'm', long = "matcher", value_enum)]
        matcher: Option<MatcherKind>,
    },

    /// Print the names matching a query, best first
    #[command(visible_alias = "f")]
    Filter {
        #[arg(value_name = "QUERY")]
        query: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Print at most this many matches
        #[arg(short = 'n', long = "limit", value_name = "N")]
        limit: Option<usize>,

        /// Print matches as JSON
        #[arg(long = "json")]
        json: bool,

        /// Matcher to rank with (overrides config)
        #[arg(short = 'm', long = "matcher", value_enum)]
        matcher: Option<MatcherKind>,
    },

    /// Print the type hierarchy
    #[command(visible_alias = "t")]
    Tree {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Generate a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Parse command-line arguments
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_pick_args() {
        let cli = Cli::parse_from([
            "typepick",
            "pick",
            "types.txt",
            "--select",
            "Game.UI.MainMenu",
            "--no-none",
            "-g",
            "by-namespace-flat",
        ]);

        match cli.command {
            Commands::Pick {
                source,
                select,
                no_none,
                ..
            } => {
                assert_eq!(source.file, Some(PathBuf::from("types.txt")));
                assert_eq!(source.grouping, Some(Grouping::ByNamespaceFlat));
                assert_eq!(select.as_deref(), Some("Game.UI.MainMenu"));
                assert!(no_none);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["typepick", "tree", "--log-level", "debug", "--config", "c.toml"]);

        assert_eq!(cli.log_level.as_deref(), Some("debug"));
        assert_eq!(cli.config, Some(PathBuf::from("c.toml")));
        assert!(matches!(cli.command, Commands::Tree { .. }));
    }

    #[test]
    fn test_dash_means_stdin() {
        let source = SourceArgs {
            file: Some(PathBuf::from("-")),
            ..SourceArgs::default()
        };
        assert_eq!(source.input(), None);
    }

    #[test]
    fn test_apply_overrides_config() {
        let mut config = PickConfig {
            exclude: vec!["System.*".to_string()],
            ..PickConfig::default()
        };
        let source = SourceArgs {
            grouping: Some(Grouping::None),
            exclude: vec!["Unity.*".to_string()],
            ..SourceArgs::default()
        };

        source.apply(&mut config);

        assert_eq!(config.grouping, Grouping::None);
        assert_eq!(config.exclude, vec!["System.*", "Unity.*"]);
    }
}
