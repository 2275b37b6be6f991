//! Per-environment option bundles.
//!
//! Each environment selects a fixed bundle of options for the three tasks
//! that vary by environment: the debug-statement scan, the style lint, and
//! the stylesheet compile. Bundles are defined statically here rather
//! than read from the project file, so the exact shape of each
//! environment is visible in one place and covered by tests.

use std::path::PathBuf;

use crate::config::ConfigError;
use crate::env::Environment;

/// Where the CI lint report is written, relative to the project root.
///
/// The path is scraped by the CI job that collects checkstyle reports;
/// it must not drift.
pub const CI_LINT_REPORT_PATH: &str = "../../../../../reports/scsslint.checkstyle.xml";

/// Where the CI debug-scan log is written, relative to the project root.
pub const CI_SCAN_LOG_PATH: &str = "../../../../../reports/js.debug.txt";

/// Destination format for debug-scan match logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Print matches to the console
    Console,
    /// Write matches to a plain-text log file
    Text,
}

impl std::fmt::Display for LogFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogFormat::Console => write!(f, "console"),
            LogFormat::Text => write!(f, "text"),
        }
    }
}

/// Output style for the stylesheet compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// Human-readable nested output
    Nested,
    /// Minified output
    Compressed,
}

impl std::fmt::Display for OutputStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputStyle::Nested => write!(f, "nested"),
            OutputStyle::Compressed => write!(f, "compressed"),
        }
    }
}

/// Debug-statement scan options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanOptions {
    /// Log file for matches; `None` means no file is written
    pub log_file: Option<PathBuf>,
    /// Where match details go
    pub log_format: LogFormat,
}

/// Style lint options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintOptions {
    /// Run the linter through `bundle exec`
    pub bundle_exec: bool,
    /// Linter configuration file
    pub config: PathBuf,
    /// Structured report destination; `None` means console only
    pub reporter_output: Option<PathBuf>,
    /// Colorize console output
    pub colorize_output: bool,
    /// Report lint failures without failing the build target
    pub force: bool,
}

/// Stylesheet compile options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit source comments; unset means the compiler's own default applies
    pub source_comments: Option<bool>,
    /// Output style
    pub output_style: OutputStyle,
    /// Emit a source map alongside the output
    pub source_map: bool,
    /// Include search paths, in order; may contain `${...}` placeholders
    pub include_paths: Vec<String>,
}

/// The fixed option bundle for one environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvProfile {
    /// Debug-scan options
    pub scan: ScanOptions,
    /// Style-lint options
    pub lint: LintOptions,
    /// Stylesheet-compile options
    pub compile: CompileOptions,
}

impl EnvProfile {
    /// The bundle used for local development.
    pub fn local() -> Self {
        Self {
            scan: ScanOptions { log_file: None, log_format: LogFormat::Console },
            lint: LintOptions {
                bundle_exec: false,
                config: PathBuf::from(".scss-lint.yml"),
                reporter_output: None,
                colorize_output: true,
                force: true,
            },
            compile: CompileOptions {
                source_comments: Some(true),
                output_style: OutputStyle::Nested,
                source_map: false,
                include_paths: vec!["${theme_scss_path}".to_string()],
            },
        }
    }

    /// The bundle used on CI.
    ///
    /// `source_comments` stays unset here rather than inheriting the
    /// local value; each bundle specifies its fields independently.
    pub fn ci() -> Self {
        Self {
            scan: ScanOptions {
                log_file: Some(PathBuf::from(CI_SCAN_LOG_PATH)),
                log_format: LogFormat::Text,
            },
            lint: LintOptions {
                bundle_exec: false,
                config: PathBuf::from(".scss-lint.yml"),
                reporter_output: Some(PathBuf::from(CI_LINT_REPORT_PATH)),
                colorize_output: false,
                force: true,
            },
            compile: CompileOptions {
                source_comments: None,
                output_style: OutputStyle::Compressed,
                source_map: false,
                include_paths: vec!["${theme_scss_path}".to_string()],
            },
        }
    }

    /// The bundle for a given environment.
    pub fn for_env(env: Environment) -> Self {
        match env {
            Environment::Local => Self::local(),
            Environment::Ci => Self::ci(),
        }
    }

    /// Resolve a bundle from an operator-supplied environment name.
    ///
    /// Fails with [`ConfigError::UnknownEnvironment`] for any name outside
    /// the supported set; no partial or fallback bundle is produced.
    pub fn resolve(name: &str) -> Result<Self, ConfigError> {
        Environment::parse(name).map(Self::for_env)
    }
}
