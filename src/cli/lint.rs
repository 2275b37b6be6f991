//! Lint command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{load_project, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::env::Environment;
use crate::tasks::TaskSet;

/// Run the lint command
pub fn run_lint(env_name: &str, dry_run: bool, config_path: Option<&Path>) -> ExitCode {
    let env = match Environment::parse(env_name) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let (config, root) = match load_project(config_path, &CliOverrides::default(), false) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let tasks = match TaskSet::assemble(env, &config) {
        Ok(tasks) => tasks,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if dry_run {
        println!("Dry run - would lint:");
        println!("  Files: {}", tasks.lint.files);
        println!("  Lint: {}", tasks.lint.command());
        return ExitCode::from(EXIT_SUCCESS);
    }

    match tasks.lint.run(&root) {
        Ok(true) => {
            println!("Lint passed: {}", tasks.lint.files);
            ExitCode::from(EXIT_SUCCESS)
        }
        Ok(false) => {
            // force mode: problems reported by the linter do not fail the target
            eprintln!("Lint reported problems (continuing)");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Lint error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
