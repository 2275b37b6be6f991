//! Build environment selection.
//!
//! The set of environments is closed: configurations exist for local
//! development and for continuous integration, nothing else. Keeping this
//! as an enum makes every consumer exhaustively checkable.

use crate::config::ConfigError;

/// A named build environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Local development: readable output, colorized lint, no report files
    Local,
    /// Continuous integration: compressed output, report files for scrapers
    Ci,
}

impl Environment {
    /// Parse an environment name supplied by the operator.
    ///
    /// Recognized names are `"local"` and `"ci"`. Any other name is an
    /// error: once an explicit name is given there is no silent fallback
    /// to a default.
    pub fn parse(name: &str) -> Result<Self, ConfigError> {
        match name {
            "local" => Ok(Environment::Local),
            "ci" => Ok(Environment::Ci),
            other => Err(ConfigError::UnknownEnvironment(other.to_string())),
        }
    }

    /// The canonical name of this environment.
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Ci => "ci",
        }
    }

    /// Whether this is the continuous-integration environment.
    pub fn is_ci(&self) -> bool {
        matches!(self, Environment::Ci)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Local
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Environment::parse(s)
    }
}
