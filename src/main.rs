//! Typepick CLI application entry point
//!
//! # Usage
//!
//! ```bash
//! # Pick a type interactively; the choice is printed to stdout
//! typepick pick types.txt
//! cat types.txt | typepick pick --select Game.UI.MainMenu
//!
//! # Ranked matches without a UI
//! typepick filter GL types.txt --limit 5
//! typepick filter GL types.txt --json
//!
//! # Show the hierarchy
//! typepick tree types.txt --grouping by-namespace-flat
//!
//! # Shell completions
//! typepick completions zsh > _typepick
//! ```
//!
//! # Configuration
//!
//! Defaults are read from the user's config directory
//! (`~/.config/typepick/config.toml` on Linux) and from `TYPEPICK_*`
//! environment variables.
//!
//! # Exit status
//!
//! 0 on success, 1 when the picker was cancelled, 2 on error.

use colored::Colorize;
use std::path::Path;
use std::process::ExitCode;
use typepick::{
    cli::{Cli, Commands, SourceArgs},
    commands::{self, load_catalog, pick::PickRequest},
    config::PickConfig,
    logging::{self, LogGuard, LogTarget},
};

type Result<T> = std::result::Result<T, typepick::PickError>;

/// Configuration file and environment, then command-line overrides
fn load_config(path: Option<&Path>, source: &SourceArgs) -> Result<PickConfig> {
    let mut config = PickConfig::load(path)?;
    source.apply(&mut config);
    Ok(config)
}

fn run(cli: Cli) -> Result<ExitCode> {
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Pick {
            source,
            select,
            query,
            no_none,
            expand_all,
            matcher,
        } => {
            let mut config = load_config(config_path, &source)?;
            config.include_none &= !no_none;
            config.expand_all |= expand_all;
            if let Some(matcher) = matcher {
                config.matcher = matcher;
            }

            let catalog = load_catalog(&source, &config)?;
            let picked = commands::pick(&catalog, &config, &PickRequest { select, query })?;
            Ok(if picked {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(1)
            })
        }
        Commands::Filter {
            query,
            source,
            limit,
            json,
            matcher,
        } => {
            let config = load_config(config_path, &source)?;
            let catalog = load_catalog(&source, &config)?;
            commands::filter(
                &catalog,
                &query,
                matcher.unwrap_or(config.matcher),
                limit,
                json,
                cli.quiet,
            )?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Tree { source } => {
            let config = load_config(config_path, &source)?;
            let catalog = load_catalog(&source, &config)?;
            commands::tree(&catalog, cli.quiet);
            Ok(ExitCode::SUCCESS)
        }
        Commands::Completions { shell } => {
            commands::completions(shell);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let target = if matches!(cli.command, Commands::Pick { .. }) {
        LogTarget::File
    } else {
        LogTarget::Stderr
    };
    let _guard = logging::init_logger(cli.log_level.as_deref(), target).unwrap_or_else(|e| {
        eprintln!("{} logging disabled: {e}", "warning:".yellow().bold());
        LogGuard::default()
    });

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::from(2)
        }
    }
}
