//! Style lint task.
//!
//! Linting is delegated to the external `scss-lint` tool. The bundle
//! decides colorization, report output, and whether a lint failure is
//! tolerated (`force`): under `force` a failing lint is reported but the
//! build target still succeeds.

use std::path::Path;

use crate::config::ConfigError;
use crate::profile::LintOptions;
use crate::tasks::command::{CommandSpec, TaskError};
use crate::vars::{PathVars, THEME_SCSS_PATH};

/// Assembled style-lint task configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintTask {
    /// Glob of stylesheet sources to lint (placeholder-expanded)
    pub files: String,
    /// Bundle lint options
    pub options: LintOptions,
}

impl LintTask {
    /// Assemble the lint task from the active bundle.
    pub fn assemble(options: &LintOptions, vars: &PathVars) -> Result<Self, ConfigError> {
        let files = vars.expand(&format!("${{{}}}/**/*.scss", THEME_SCSS_PATH))?;
        Ok(Self { files, options: options.clone() })
    }

    /// Whether console output should actually be colorized.
    ///
    /// The bundle requests colorization; it is dropped when stdout is not
    /// a terminal so piped output stays clean.
    pub fn effective_colorize(&self) -> bool {
        self.options.colorize_output && atty::is(atty::Stream::Stdout)
    }

    /// The `scss-lint` collaborator invocation, with explicit colorization.
    pub fn command_with_color(&self, colorize: bool) -> CommandSpec {
        let mut spec = if self.options.bundle_exec {
            CommandSpec::new("bundle").arg("exec").arg("scss-lint")
        } else {
            CommandSpec::new("scss-lint")
        };

        spec = spec.arg("--config").arg(self.options.config.display().to_string());

        if colorize {
            spec = spec.arg("--color");
        } else {
            spec = spec.arg("--no-color");
        }

        if let Some(report) = &self.options.reporter_output {
            spec = spec
                .arg("--format")
                .arg("Checkstyle")
                .arg("--out")
                .arg(report.display().to_string());
        }

        spec.arg(&self.files)
    }

    /// The `scss-lint` collaborator invocation for this configuration.
    pub fn command(&self) -> CommandSpec {
        self.command_with_color(self.effective_colorize())
    }

    /// Run the linter in `root`.
    ///
    /// Returns whether the lint passed. A lint failure under `force` is
    /// downgraded to `Ok(false)`; all other errors propagate.
    pub fn run(&self, root: &Path) -> Result<bool, TaskError> {
        self.settle(self.command().run(root))
    }

    /// Apply the `force` policy to a linter outcome.
    fn settle(&self, outcome: Result<(), TaskError>) -> Result<bool, TaskError> {
        match outcome {
            Ok(()) => Ok(true),
            Err(TaskError::Failed { .. }) if self.options.force => Ok(false),
            Err(err) => Err(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EnvProfile;
    use std::path::PathBuf;

    fn vars() -> PathVars {
        PathVars::theme("assets/scss", "assets/css")
    }

    #[test]
    fn test_assemble_resolves_files_glob() {
        let task = LintTask::assemble(&EnvProfile::local().lint, &vars()).unwrap();
        assert_eq!(task.files, "assets/scss/**/*.scss");
    }

    #[test]
    fn test_assemble_undefined_variable() {
        let result = LintTask::assemble(&EnvProfile::local().lint, &PathVars::new());
        assert!(matches!(result, Err(ConfigError::UndefinedVariable(_))));
    }

    #[test]
    fn test_command_local() {
        let task = LintTask::assemble(&EnvProfile::local().lint, &vars()).unwrap();
        let spec = task.command_with_color(true);

        assert_eq!(spec.program(), "scss-lint");
        assert_eq!(
            spec.arg_list(),
            &["--config", ".scss-lint.yml", "--color", "assets/scss/**/*.scss"]
        );
    }

    #[test]
    fn test_command_ci_writes_checkstyle_report() {
        let task = LintTask::assemble(&EnvProfile::ci().lint, &vars()).unwrap();
        let spec = task.command_with_color(false);

        assert_eq!(
            spec.arg_list(),
            &[
                "--config",
                ".scss-lint.yml",
                "--no-color",
                "--format",
                "Checkstyle",
                "--out",
                "../../../../../reports/scsslint.checkstyle.xml",
                "assets/scss/**/*.scss",
            ]
        );
    }

    #[test]
    fn test_command_bundle_exec() {
        let options = LintOptions {
            bundle_exec: true,
            config: PathBuf::from(".scss-lint.yml"),
            reporter_output: None,
            colorize_output: false,
            force: true,
        };
        let task = LintTask::assemble(&options, &vars()).unwrap();
        let spec = task.command_with_color(false);

        assert_eq!(spec.program(), "bundle");
        assert_eq!(spec.arg_list()[..2], ["exec".to_string(), "scss-lint".to_string()]);
    }

    #[test]
    fn test_effective_colorize_respects_bundle() {
        let task = LintTask::assemble(&EnvProfile::ci().lint, &vars()).unwrap();
        // The CI bundle disables colorization outright, regardless of TTY
        assert!(!task.effective_colorize());
    }

    #[test]
    fn test_settle_force_tolerates_lint_failure() {
        // `false` stands in for a failing linter
        let mut task = LintTask::assemble(&EnvProfile::local().lint, &vars()).unwrap();
        assert!(task.options.force);

        let failure = CommandSpec::new("false").run(Path::new("."));
        assert!(!task.settle(failure).unwrap());

        task.options.force = false;
        let failure = CommandSpec::new("false").run(Path::new("."));
        assert!(task.settle(failure).is_err());
    }

    #[test]
    fn test_settle_spawn_errors_propagate_even_with_force() {
        let task = LintTask::assemble(&EnvProfile::local().lint, &vars()).unwrap();
        let missing = CommandSpec::new("stylemill-no-such-binary").run(Path::new("."));
        assert!(task.settle(missing).is_err());
    }
}
