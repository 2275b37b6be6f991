//! Scan command implementation

use std::path::Path;
use std::process::ExitCode;

use super::{load_project, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::env::Environment;
use crate::profile::LogFormat;
use crate::report;
use crate::tasks::TaskSet;

/// Run the scan command.
///
/// A completed scan always exits successfully regardless of match count:
/// the warnings are advisory, and acting on them is the caller's policy.
pub fn run_scan(env_name: &str, json: bool, config_path: Option<&Path>) -> ExitCode {
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

    let result = match tasks.scan.run(&root) {
        Ok(result) => result,
        Err(e) => {
            eprintln!("Scan error: {}", e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    if json {
        match serde_json::to_string_pretty(&result) {
            Ok(out) => println!("{}", out),
            Err(e) => {
                eprintln!("Scan error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        match tasks.scan.options.log_format {
            LogFormat::Console => {
                for m in &result.matches {
                    println!("{}:{}: {}", m.file.display(), m.line, m.text);
                }
            }
            LogFormat::Text => match tasks.scan.write_log(&result, &root) {
                Ok(Some(path)) => println!("Scan log written to {}", path.display()),
                Ok(None) => {}
                Err(e) => {
                    eprintln!("Scan error: {}", e);
                    return ExitCode::from(EXIT_ERROR);
                }
            },
        }
    }

    report::report(&result, env);
    ExitCode::from(EXIT_SUCCESS)
}
