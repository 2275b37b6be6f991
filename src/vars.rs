//! Global path variable registry.
//!
//! Configuration values may reference shared path variables with
//! `${name}` placeholders (for example `${theme_scss_path}/style.scss`).
//! The registry resolves those references when task configurations are
//! assembled; an undefined name is a configuration error, not an empty
//! substitution.

use std::collections::HashMap;

use crate::config::ConfigError;

/// Symbolic name of the stylesheet source directory variable.
pub const THEME_SCSS_PATH: &str = "theme_scss_path";

/// Symbolic name of the compiled stylesheet output directory variable.
pub const THEME_CSS_PATH: &str = "theme_css_path";

/// Registry of global path variables.
///
/// Built once per invocation and immutable afterwards; every consumer
/// expands against the same values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathVars {
    vars: HashMap<String, String>,
}

impl PathVars {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self { vars: HashMap::new() }
    }

    /// Create a registry with the two theme path variables defined.
    pub fn theme(scss_path: &str, css_path: &str) -> Self {
        let mut vars = Self::new();
        vars.define(THEME_SCSS_PATH, scss_path);
        vars.define(THEME_CSS_PATH, css_path);
        vars
    }

    /// Define a variable. Redefining a name replaces its value.
    pub fn define(&mut self, name: &str, value: &str) {
        self.vars.insert(name.to_string(), value.to_string());
    }

    /// Get the raw value of a variable.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|s| s.as_str())
    }

    /// Check if a variable is defined.
    pub fn contains(&self, name: &str) -> bool {
        self.vars.contains_key(name)
    }

    /// Number of defined variables.
    pub fn len(&self) -> usize {
        self.vars.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    /// Expand every `${name}` placeholder in `input`.
    ///
    /// Returns the input with all placeholders replaced by their current
    /// values. A reference to an undefined variable fails with
    /// [`ConfigError::UndefinedVariable`]; an unterminated `${` is treated
    /// the same way, naming the malformed remainder.
    pub fn expand(&self, input: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(input.len());
        let mut rest = input;

        while let Some(start) = rest.find("${") {
            out.push_str(&rest[..start]);
            let after = &rest[start + 2..];
            let end = after
                .find('}')
                .ok_or_else(|| ConfigError::UndefinedVariable(after.to_string()))?;
            let name = &after[..end];
            let value = self
                .vars
                .get(name)
                .ok_or_else(|| ConfigError::UndefinedVariable(name.to_string()))?;
            out.push_str(value);
            rest = &after[end + 1..];
        }

        out.push_str(rest);
        Ok(out)
    }
}
