//! Configuration loading and discovery for `stylemill.toml`
//!
//! Provides functions to find, load, and merge configuration, plus the
//! shared configuration error type. Configuration errors are fatal: they
//! fail the invocation before any task runs.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::schema::{MillConfig, PathsConfig, ProjectConfig, WatchConfig};

/// Configuration error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse stylemill.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
    /// Environment name outside the supported set
    #[error("Unknown environment '{0}' (expected 'local' or 'ci')")]
    UnknownEnvironment(String),
    /// A `${...}` placeholder referenced an undefined path variable
    #[error("Undefined path variable '${{{0}}}'")]
    UndefinedVariable(String),
    /// Malformed file selector pattern
    #[error("Invalid glob pattern: {0}")]
    Pattern(#[from] glob::PatternError),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the stylesheet source directory
    pub scss: Option<String>,
    /// Override the compiled stylesheet output directory
    pub css: Option<String>,
    /// Override the stylesheet entry file
    pub entry: Option<String>,
}

/// Find stylemill.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join("stylemill.toml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Find stylemill.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Load configuration from a stylemill.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate the config file. If no config file is found,
/// returns a default configuration.
pub fn load_config(path: Option<&Path>) -> Result<MillConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<MillConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: MillConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Create a default configuration when no stylemill.toml is found.
///
/// Returns a minimal valid configuration with the project name set to
/// the current directory name.
pub fn default_config() -> MillConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unnamed".to_string());

    MillConfig {
        project: ProjectConfig { name: project_name, entry: "style.scss".to_string() },
        paths: PathsConfig::default(),
        watch: WatchConfig::default(),
    }
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values.
pub fn merge_cli_overrides(config: &mut MillConfig, overrides: &CliOverrides) {
    if let Some(ref scss) = overrides.scss {
        config.paths.theme_scss_path = scss.clone();
    }

    if let Some(ref css) = overrides.css {
        config.paths.theme_css_path = css.clone();
    }

    if let Some(ref entry) = overrides.entry {
        config.project.entry = entry.clone();
    }
}

/// Resolve a path relative to the project root.
///
/// If the path is absolute, returns it unchanged.
/// If relative, joins it with the project root.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}
