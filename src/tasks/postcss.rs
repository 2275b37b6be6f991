//! Post-processing task.
//!
//! Runs compiled stylesheets through the external `postcss` tool with a
//! fixed processor list: vendor prefixing for the last two browser major
//! versions, with source maps. Unlike the other tasks this configuration
//! does not vary by environment: it depends only on where the compiled
//! output lives.

use std::path::Path;

use crate::config::ConfigError;
use crate::tasks::command::{CommandSpec, TaskError};
use crate::vars::{PathVars, THEME_CSS_PATH};

/// Browser range the prefixer targets.
pub const AUTOPREFIXER_BROWSERS: &str = "last 2 version";

/// Assembled post-processing task configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostcssTask {
    /// Glob of compiled stylesheets to transform in place
    pub files: String,
    /// Emit source maps alongside the transformed files
    pub source_map: bool,
    /// Processor list, in order
    pub processors: Vec<String>,
}

impl PostcssTask {
    /// Assemble the post-processing task.
    pub fn assemble(vars: &PathVars) -> Result<Self, ConfigError> {
        let files = vars.expand(&format!("${{{}}}/*.css", THEME_CSS_PATH))?;
        Ok(Self {
            files,
            source_map: true,
            processors: vec!["autoprefixer".to_string()],
        })
    }

    /// The `postcss` collaborator invocation for this configuration.
    ///
    /// The browser range reaches the prefixer through the standard
    /// `BROWSERSLIST` environment variable.
    pub fn command(&self) -> CommandSpec {
        let mut spec = CommandSpec::new("postcss");
        for processor in &self.processors {
            spec = spec.arg("--use").arg(processor);
        }
        if self.source_map {
            spec = spec.arg("--map");
        }
        spec.arg("--replace")
            .arg(&self.files)
            .env("BROWSERSLIST", AUTOPREFIXER_BROWSERS)
    }

    /// Run the post-processor in `root`.
    pub fn run(&self, root: &Path) -> Result<(), TaskError> {
        self.command().run(root)
    }
}
