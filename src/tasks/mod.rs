//! Task configurations and the builder that assembles them.
//!
//! One configuration object per downstream task, each combining the
//! relevant slice of the active environment bundle, the file selectors,
//! and placeholder-resolved paths from the global path variables.

pub mod command;
pub mod compile;
pub mod lint;
pub mod postcss;
pub mod scan;

pub use command::{CommandSpec, TaskError};
pub use compile::CompileTask;
pub use lint::LintTask;
pub use postcss::PostcssTask;
pub use scan::{debug_call_regex, ScanMatch, ScanResult, ScanTask, DEBUG_CALL_PATTERNS};

use std::path::PathBuf;

use crate::config::{ConfigError, MillConfig, WatchConfig};
use crate::env::Environment;
use crate::profile::EnvProfile;
use crate::vars::{PathVars, THEME_SCSS_PATH};

/// Assembled watch task configuration.
///
/// The rule is static: whenever anything under the stylesheet source path
/// changes, rerun compile + post-process and notify connected clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTask {
    /// Directory watched recursively (placeholder-expanded)
    pub watch_dir: PathBuf,
    /// Debounce / screen / live-reload settings
    pub config: WatchConfig,
}

impl WatchTask {
    /// Assemble the watch task.
    pub fn assemble(config: &WatchConfig, vars: &PathVars) -> Result<Self, ConfigError> {
        let watch_dir = vars.expand(&format!("${{{}}}", THEME_SCSS_PATH))?;
        Ok(Self { watch_dir: PathBuf::from(watch_dir), config: config.clone() })
    }
}

/// The complete set of per-task configurations for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSet {
    /// Active environment
    pub env: Environment,
    /// Debug-statement scan
    pub scan: ScanTask,
    /// Style lint
    pub lint: LintTask,
    /// Stylesheet compile
    pub compile: CompileTask,
    /// Vendor prefixing
    pub postcss: PostcssTask,
    /// Watch rule
    pub watch: WatchTask,
}

impl TaskSet {
    /// Assemble every task configuration for an environment.
    ///
    /// Pure: identical inputs yield identical task sets. Placeholders are
    /// resolved here; an undefined variable fails the whole assembly with
    /// no partial set.
    pub fn assemble(env: Environment, config: &MillConfig) -> Result<Self, ConfigError> {
        let profile = EnvProfile::for_env(env);
        let vars = config.path_vars();
        Self::assemble_with(env, &profile, &vars, config)
    }

    /// Assemble from explicit parts.
    ///
    /// Exposed so callers can substitute a bundle or variable registry;
    /// [`TaskSet::assemble`] is the common path.
    pub fn assemble_with(
        env: Environment,
        profile: &EnvProfile,
        vars: &PathVars,
        config: &MillConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            env,
            scan: ScanTask::assemble(&profile.scan, vars)?,
            lint: LintTask::assemble(&profile.lint, vars)?,
            compile: CompileTask::assemble(&profile.compile, vars, &config.project.entry)?,
            postcss: PostcssTask::assemble(vars)?,
            watch: WatchTask::assemble(&config.watch, vars)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::default_config;
    use crate::profile::{CI_LINT_REPORT_PATH, CI_SCAN_LOG_PATH};

    #[test]
    fn test_assemble_is_idempotent() {
        let config = default_config();
        let a = TaskSet::assemble(Environment::Ci, &config).unwrap();
        let b = TaskSet::assemble(Environment::Ci, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_assemble_leaves_no_placeholders() {
        let config = default_config();
        let tasks = TaskSet::assemble(Environment::Ci, &config).unwrap();

        assert!(!tasks.compile.src.display().to_string().contains("${"));
        assert!(!tasks.compile.dest.display().to_string().contains("${"));
        for path in &tasks.compile.options.include_paths {
            assert!(!path.contains("${"));
        }
        assert!(!tasks.lint.files.contains("${"));
        assert!(!tasks.postcss.files.contains("${"));
        assert!(!tasks.watch.watch_dir.display().to_string().contains("${"));
    }

    #[test]
    fn test_assemble_ci_report_paths() {
        let config = default_config();
        let tasks = TaskSet::assemble(Environment::Ci, &config).unwrap();

        assert_eq!(
            tasks.lint.options.reporter_output,
            Some(PathBuf::from(CI_LINT_REPORT_PATH))
        );
        assert_eq!(tasks.scan.options.log_file, Some(PathBuf::from(CI_SCAN_LOG_PATH)));
    }

    #[test]
    fn test_assemble_postcss_is_env_independent() {
        let config = default_config();
        let local = TaskSet::assemble(Environment::Local, &config).unwrap();
        let ci = TaskSet::assemble(Environment::Ci, &config).unwrap();
        assert_eq!(local.postcss, ci.postcss);
    }

    #[test]
    fn test_assemble_uses_configured_paths() {
        let mut config = default_config();
        config.paths.theme_scss_path = "web/scss".to_string();
        config.paths.theme_css_path = "web/css".to_string();

        let tasks = TaskSet::assemble(Environment::Local, &config).unwrap();
        assert_eq!(tasks.compile.src, PathBuf::from("web/scss/style.scss"));
        assert_eq!(tasks.compile.dest, PathBuf::from("web/css/style.css"));
        assert_eq!(tasks.lint.files, "web/scss/**/*.scss");
        assert_eq!(tasks.postcss.files, "web/css/*.css");
        assert_eq!(tasks.watch.watch_dir, PathBuf::from("web/scss"));
    }

    #[test]
    fn test_assemble_with_missing_variable_fails() {
        let config = default_config();
        let profile = EnvProfile::local();
        let vars = PathVars::new();

        let result = TaskSet::assemble_with(Environment::Local, &profile, &vars, &config);
        assert!(matches!(result, Err(ConfigError::UndefinedVariable(_))));
    }

    #[test]
    fn test_watch_task_carries_watch_config() {
        let mut config = default_config();
        config.watch.debounce_ms = 250;
        config.watch.live_reload = false;

        let tasks = TaskSet::assemble(Environment::Local, &config).unwrap();
        assert_eq!(tasks.watch.config.debounce_ms, 250);
        assert!(!tasks.watch.config.live_reload);
    }
}
