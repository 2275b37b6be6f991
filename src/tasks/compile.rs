//! Stylesheet compile task.
//!
//! Compilation itself is delegated to the external `sass` compiler; this
//! module only resolves the source→destination mapping and turns the
//! bundle's compile options into the collaborator invocation.

use std::path::{Path, PathBuf};

use crate::config::ConfigError;
use crate::profile::{CompileOptions, OutputStyle};
use crate::tasks::command::{CommandSpec, TaskError};
use crate::vars::{PathVars, THEME_CSS_PATH, THEME_SCSS_PATH};

/// Assembled stylesheet-compile task configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileTask {
    /// Entry stylesheet (placeholder-expanded)
    pub src: PathBuf,
    /// Compiled output file (placeholder-expanded)
    pub dest: PathBuf,
    /// Bundle compile options with include paths expanded
    pub options: CompileOptions,
}

impl CompileTask {
    /// Assemble the compile task for the given entry file.
    ///
    /// The mapping is fixed: `<scss path>/<entry>` compiles to
    /// `<css path>/<entry stem>.css`.
    pub fn assemble(
        options: &CompileOptions,
        vars: &PathVars,
        entry: &str,
    ) -> Result<Self, ConfigError> {
        let src = vars.expand(&format!("${{{}}}/{}", THEME_SCSS_PATH, entry))?;
        let out_name = Path::new(entry).with_extension("css");
        let dest =
            vars.expand(&format!("${{{}}}/{}", THEME_CSS_PATH, out_name.display()))?;

        let include_paths = options
            .include_paths
            .iter()
            .map(|p| vars.expand(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            src: PathBuf::from(src),
            dest: PathBuf::from(dest),
            options: CompileOptions { include_paths, ..options.clone() },
        })
    }

    /// The `sass` collaborator invocation for this configuration.
    pub fn command(&self) -> CommandSpec {
        let mut spec = CommandSpec::new("sass")
            .arg(format!("--style={}", self.options.output_style));

        if self.options.source_map {
            spec = spec.arg("--source-map");
        } else {
            spec = spec.arg("--no-source-map");
        }

        if let Some(source_comments) = self.options.source_comments {
            if source_comments {
                spec = spec.arg("--source-comments");
            }
        }

        for path in &self.options.include_paths {
            spec = spec.arg(format!("--load-path={}", path));
        }

        spec.arg(self.src.display().to_string()).arg(self.dest.display().to_string())
    }

    /// Run the compiler in `root`, creating the output directory first.
    pub fn run(&self, root: &Path) -> Result<(), TaskError> {
        if let Some(parent) = self.dest.parent() {
            std::fs::create_dir_all(root.join(parent))?;
        }
        self.command().run(root)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::EnvProfile;

    fn vars() -> PathVars {
        PathVars::theme("assets/scss", "assets/css")
    }

    #[test]
    fn test_assemble_fixed_mapping() {
        let task =
            CompileTask::assemble(&EnvProfile::local().compile, &vars(), "style.scss").unwrap();
        assert_eq!(task.src, PathBuf::from("assets/scss/style.scss"));
        assert_eq!(task.dest, PathBuf::from("assets/css/style.css"));
    }

    #[test]
    fn test_assemble_custom_entry() {
        let task =
            CompileTask::assemble(&EnvProfile::ci().compile, &vars(), "theme.scss").unwrap();
        assert_eq!(task.src, PathBuf::from("assets/scss/theme.scss"));
        assert_eq!(task.dest, PathBuf::from("assets/css/theme.css"));
    }

    #[test]
    fn test_assemble_expands_include_paths() {
        let task =
            CompileTask::assemble(&EnvProfile::local().compile, &vars(), "style.scss").unwrap();
        assert_eq!(task.options.include_paths, vec!["assets/scss".to_string()]);
    }

    #[test]
    fn test_assemble_undefined_variable() {
        let empty = PathVars::new();
        let result = CompileTask::assemble(&EnvProfile::local().compile, &empty, "style.scss");
        assert!(matches!(result, Err(ConfigError::UndefinedVariable(_))));
    }

    #[test]
    fn test_command_local_options() {
        let task =
            CompileTask::assemble(&EnvProfile::local().compile, &vars(), "style.scss").unwrap();
        let spec = task.command();

        assert_eq!(spec.program(), "sass");
        assert_eq!(
            spec.arg_list(),
            &[
                "--style=nested",
                "--no-source-map",
                "--source-comments",
                "--load-path=assets/scss",
                "assets/scss/style.scss",
                "assets/css/style.css",
            ]
        );
    }

    #[test]
    fn test_command_ci_options() {
        let task =
            CompileTask::assemble(&EnvProfile::ci().compile, &vars(), "style.scss").unwrap();
        let spec = task.command();

        // Compressed output, and no --source-comments flag since the CI
        // bundle leaves it unset
        assert!(spec.arg_list().contains(&"--style=compressed".to_string()));
        assert!(!spec.arg_list().iter().any(|a| a == "--source-comments"));
    }

    #[test]
    fn test_command_source_map_flag() {
        let options = CompileOptions {
            source_comments: None,
            output_style: OutputStyle::Nested,
            source_map: true,
            include_paths: vec![],
        };
        let task = CompileTask::assemble(&options, &vars(), "style.scss").unwrap();
        assert!(task.command().arg_list().contains(&"--source-map".to_string()));
    }
}
