//! Configuration schema types for `stylemill.toml`
//!
//! Defines the structure and validation rules for stylemill project
//! configuration. Environment option bundles are NOT part of the file;
//! they are fixed per environment (see [`crate::profile`]). The file only
//! supplies the project paths and watch settings.

use serde::{Deserialize, Serialize};

use crate::vars::PathVars;

/// Project metadata section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Stylesheet entry file, relative to the scss path
    #[serde(default = "default_entry")]
    pub entry: String,
}

fn default_entry() -> String {
    "style.scss".to_string()
}

/// Global path variables section
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Stylesheet source directory
    #[serde(default = "default_scss_path")]
    pub theme_scss_path: String,
    /// Compiled stylesheet output directory
    #[serde(default = "default_css_path")]
    pub theme_css_path: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            theme_scss_path: default_scss_path(),
            theme_css_path: default_css_path(),
        }
    }
}

fn default_scss_path() -> String {
    "assets/scss".to_string()
}

fn default_css_path() -> String {
    "assets/css".to_string()
}

/// Watch mode configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Clear terminal between rebuilds
    #[serde(default = "default_true")]
    pub clear_screen: bool,
    /// Notify connected clients after each successful rebuild
    #[serde(default = "default_true")]
    pub live_reload: bool,
}

fn default_debounce_ms() -> u32 {
    100
}

fn default_true() -> bool {
    true
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 100,
            clear_screen: true,
            live_reload: true,
        }
    }
}

/// Complete stylemill.toml configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MillConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    /// Global path variables
    #[serde(default)]
    pub paths: PathsConfig,
    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "paths.theme_scss_path")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stylemill.toml: '{}' {}", self.field, self.message)
    }
}

impl MillConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        if self.project.name.is_empty() {
            errors.push(ConfigValidationError {
                field: "project.name".to_string(),
                message: "must be a non-empty string".to_string(),
            });
        }

        if self.project.entry.is_empty() {
            errors.push(ConfigValidationError {
                field: "project.entry".to_string(),
                message: "must be a non-empty file name".to_string(),
            });
        }

        if self.paths.theme_scss_path.is_empty() {
            errors.push(ConfigValidationError {
                field: "paths.theme_scss_path".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.paths.theme_css_path.is_empty() {
            errors.push(ConfigValidationError {
                field: "paths.theme_css_path".to_string(),
                message: "must be a non-empty path".to_string(),
            });
        }

        if self.watch.debounce_ms == 0 {
            errors.push(ConfigValidationError {
                field: "watch.debounce_ms".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// The global path variable registry this configuration defines.
    pub fn path_vars(&self) -> PathVars {
        PathVars::theme(&self.paths.theme_scss_path, &self.paths.theme_css_path)
    }
}
