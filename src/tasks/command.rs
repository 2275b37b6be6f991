//! Collaborator command invocations.
//!
//! Compile, post-processing, and lint work is delegated to external
//! tools. A [`CommandSpec`] captures the exact invocation a task
//! configuration resolves to, so it can be inspected (`--dry-run`, tests)
//! separately from being executed.

use std::path::Path;
use std::process::{Command, ExitStatus};

use thiserror::Error;

use crate::config::ConfigError;

/// Task execution error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TaskError {
    /// The collaborator binary could not be launched
    #[error("Failed to launch '{program}': {source}")]
    Spawn {
        /// Program that failed to start
        program: String,
        /// Underlying launch error
        source: std::io::Error,
    },
    /// The collaborator ran and reported failure
    #[error("'{program}' failed: {status}")]
    Failed {
        /// Program that failed
        program: String,
        /// Its exit status, verbatim
        status: ExitStatus,
    },
    /// I/O error while scanning or writing a log
    #[error("Task I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Configuration failure surfaced while selecting files
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// An external command invocation: program, arguments, and environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    program: String,
    args: Vec<String>,
    env: Vec<(String, String)>,
}

impl CommandSpec {
    /// Create a spec for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into(), args: Vec::new(), env: Vec::new() }
    }

    /// Append one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment variable for the invocation.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// The program name.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The argument list.
    pub fn arg_list(&self) -> &[String] {
        &self.args
    }

    /// The environment variables set for the invocation.
    pub fn env_list(&self) -> &[(String, String)] {
        &self.env
    }

    /// Run the command in `cwd`, inheriting stdio.
    ///
    /// The collaborator's own output and diagnostics pass through
    /// untouched; a non-zero exit becomes [`TaskError::Failed`].
    pub fn run(&self, cwd: &Path) -> Result<(), TaskError> {
        let mut command = Command::new(&self.program);
        command.args(&self.args).current_dir(cwd);
        for (key, value) in &self.env {
            command.env(key, value);
        }

        let status = command
            .status()
            .map_err(|source| TaskError::Spawn { program: self.program.clone(), source })?;

        if status.success() {
            Ok(())
        } else {
            Err(TaskError::Failed { program: self.program.clone(), status })
        }
    }
}

impl std::fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (key, value) in &self.env {
            write!(f, "{}='{}' ", key, value)?;
        }
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}
