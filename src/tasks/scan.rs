//! Debug-statement scan task.
//!
//! The one task implemented natively: search every selected source file
//! for console debug calls left behind during development. The scan only
//! observes and reports; deciding whether matches should fail a build
//! belongs to whoever consumes the report (see [`crate::report`]).

use std::fs;
use std::path::{Path, PathBuf};

use regex::Regex;
use serde::Serialize;

use crate::config::{resolve_path, ConfigError};
use crate::profile::{LogFormat, ScanOptions};
use crate::selectors::FileSelector;
use crate::tasks::command::TaskError;
use crate::vars::PathVars;

/// The literal call patterns that count as debug statements.
///
/// Matching is case-sensitive and counts every non-overlapping occurrence.
pub const DEBUG_CALL_PATTERNS: [&str; 3] = ["console.log(", "console.table(", "console.trace("];

/// Build the scan regex from the fixed pattern set.
pub fn debug_call_regex() -> Regex {
    let alternation =
        DEBUG_CALL_PATTERNS.iter().map(|p| regex::escape(p)).collect::<Vec<_>>().join("|");
    // The pattern set is fixed and escaped, compilation cannot fail
    Regex::new(&alternation).expect("debug call pattern is valid")
}

/// A single debug-statement occurrence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanMatch {
    /// File containing the match
    pub file: PathBuf,
    /// 1-indexed line number
    pub line: usize,
    /// The matching line, trimmed
    pub text: String,
}

/// Result of a debug-statement scan.
///
/// Produced once per scan run and consumed exactly once by the reporter;
/// not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanResult {
    /// Total number of occurrences across all selected files
    pub num_matches: usize,
    /// Per-occurrence locations
    pub matches: Vec<ScanMatch>,
}

impl ScanResult {
    /// A result with no matches.
    pub fn empty() -> Self {
        Self { num_matches: 0, matches: Vec::new() }
    }

    /// Whether the scan found anything.
    pub fn is_clean(&self) -> bool {
        self.num_matches == 0
    }
}

/// Assembled debug-scan task configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanTask {
    /// Which files to scan
    pub selector: FileSelector,
    /// Bundle options (log file path already placeholder-expanded)
    pub options: ScanOptions,
}

impl ScanTask {
    /// Assemble the scan task from the active bundle.
    pub fn assemble(options: &ScanOptions, vars: &PathVars) -> Result<Self, ConfigError> {
        let log_file = match &options.log_file {
            Some(path) => Some(PathBuf::from(vars.expand(&path.to_string_lossy())?)),
            None => None,
        };

        Ok(Self {
            selector: FileSelector::script_sources(),
            options: ScanOptions { log_file, log_format: options.log_format },
        })
    }

    /// Run the scan over files under `root`.
    pub fn run(&self, root: &Path) -> Result<ScanResult, TaskError> {
        let pattern = debug_call_regex();
        let files = self.selector.select(root)?;

        let mut matches = Vec::new();
        let mut num_matches = 0;

        for file in files {
            let contents = fs::read_to_string(&file)?;
            for (index, line) in contents.lines().enumerate() {
                let count = pattern.find_iter(line).count();
                if count == 0 {
                    continue;
                }
                num_matches += count;
                matches.push(ScanMatch {
                    file: file.clone(),
                    line: index + 1,
                    text: line.trim().to_string(),
                });
            }
        }

        Ok(ScanResult { num_matches, matches })
    }

    /// Write the match log if the bundle asks for one.
    ///
    /// Returns the path written, or `None` when the format is `console`
    /// or no log file is configured. The log file's parent directories
    /// are created as needed; its path is resolved against `root`.
    pub fn write_log(&self, result: &ScanResult, root: &Path) -> Result<Option<PathBuf>, TaskError> {
        let log_file = match (&self.options.log_format, &self.options.log_file) {
            (LogFormat::Text, Some(path)) => resolve_path(root, path),
            _ => return Ok(None),
        };

        let mut lines = Vec::with_capacity(result.matches.len() + 1);
        lines.push(format!("{} debug message(s)", result.num_matches));
        for m in &result.matches {
            lines.push(format!("{}:{}: {}", m.file.display(), m.line, m.text));
        }

        if let Some(parent) = log_file.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&log_file, lines.join("\n") + "\n")?;
        Ok(Some(log_file))
    }
}
