//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod build;
mod lint;
mod scan;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{
    default_config, find_config, load_config, merge_cli_overrides, CliOverrides, ConfigError,
    MillConfig,
};

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Stylemill - environment-aware stylesheet build orchestrator
#[derive(Parser)]
#[command(name = "stylemill")]
#[command(about = "Stylemill - compile, prefix, lint and scan theme stylesheets")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compile stylesheets and apply vendor prefixes
    Build {
        /// Build environment (local or ci)
        #[arg(long, default_value = "local")]
        env: String,

        /// Watch for changes and rebuild automatically
        #[arg(short, long)]
        watch: bool,

        /// Show the assembled configuration without running anything
        #[arg(long)]
        dry_run: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,

        /// Override the stylesheet source directory
        #[arg(long)]
        scss: Option<String>,

        /// Override the compiled stylesheet output directory
        #[arg(long)]
        css: Option<String>,

        /// Path to stylemill.toml (overrides discovery)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Lint stylesheet sources
    Lint {
        /// Build environment (local or ci)
        #[arg(long, default_value = "local")]
        env: String,

        /// Show the linter invocation without running it
        #[arg(long)]
        dry_run: bool,

        /// Path to stylemill.toml (overrides discovery)
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Scan script sources for leftover debug statements
    Scan {
        /// Build environment (local or ci)
        #[arg(long, default_value = "local")]
        env: String,

        /// Output the scan result as JSON
        #[arg(long)]
        json: bool,

        /// Path to stylemill.toml (overrides discovery)
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

/// Load project configuration and determine the project root.
///
/// An explicit path wins; otherwise the config file is discovered by
/// walking up from the working directory, and defaults apply when none
/// is found.
pub(crate) fn load_project(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
    verbose: bool,
) -> Result<(MillConfig, PathBuf), ConfigError> {
    let discovered = match config_path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    let (mut config, root) = match discovered {
        Some(path) => {
            if verbose {
                println!("Using config: {}", path.display());
            }
            let config = load_config(Some(&path))?;
            let root = path
                .parent()
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());
            (config, root)
        }
        None => {
            if verbose {
                println!("No stylemill.toml found, using defaults");
            }
            (default_config(), std::env::current_dir().unwrap_or_default())
        }
    };

    merge_cli_overrides(&mut config, overrides);
    Ok((config, root))
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { env, watch, dry_run, verbose, scss, css, config } => {
            build::run_build(&env, watch, dry_run, verbose, scss, css, config.as_deref())
        }
        Commands::Lint { env, dry_run, config } => lint::run_lint(&env, dry_run, config.as_deref()),
        Commands::Scan { env, json, config } => scan::run_scan(&env, json, config.as_deref()),
    }
}
