//! Build command implementation (compile + post-process, optionally watched)

use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::{load_project, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::CliOverrides;
use crate::env::Environment;
use crate::tasks::TaskSet;
use crate::watch::{watch_and_rebuild, WatchOptions};

/// Run the build command
#[allow(clippy::too_many_arguments)]
pub fn run_build(
    env_name: &str,
    watch: bool,
    dry_run: bool,
    verbose: bool,
    scss: Option<String>,
    css: Option<String>,
    config_path: Option<&Path>,
) -> ExitCode {
    let env = match Environment::parse(env_name) {
        Ok(env) => env,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(EXIT_INVALID_ARGS);
        }
    };

    let overrides = CliOverrides { scss, css, ..Default::default() };
    let (config, root) = match load_project(config_path, &overrides, verbose) {
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
        println!("Dry run - would build:");
        println!("  Environment: {}", env);
        println!("  Source: {}", tasks.compile.src.display());
        println!("  Output: {}", tasks.compile.dest.display());
        println!("  Compile: {}", tasks.compile.command());
        println!("  Post-process: {}", tasks.postcss.command());
        return ExitCode::from(EXIT_SUCCESS);
    }

    if watch {
        let options = WatchOptions {
            watch_dir: root.join(&tasks.watch.watch_dir),
            config: tasks.watch.config.clone(),
            verbose,
        };

        println!("Starting watch mode ({})...", env);
        println!("Press Ctrl+C to stop");
        println!();

        let compile = tasks.compile.clone();
        let postcss = tasks.postcss.clone();
        let rebuild_root = root.clone();
        let rebuild = move || {
            compile.run(&rebuild_root)?;
            postcss.run(&rebuild_root)
        };

        match watch_and_rebuild(options, rebuild) {
            Ok(()) => ExitCode::from(EXIT_SUCCESS),
            Err(e) => {
                eprintln!("Watch error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        }
    } else {
        if verbose {
            println!("Compile: {}", tasks.compile.command());
            println!("Post-process: {}", tasks.postcss.command());
        }

        println!(
            "Building {} -> {} ({})...",
            tasks.compile.src.display(),
            tasks.compile.dest.display(),
            env
        );

        let start = Instant::now();
        let outcome = tasks.compile.run(&root).and_then(|()| tasks.postcss.run(&root));

        match outcome {
            Ok(()) => {
                println!("Build complete in {:.2}s", start.elapsed().as_secs_f64());
                ExitCode::from(EXIT_SUCCESS)
            }
            Err(e) => {
                eprintln!("Build error: {}", e);
                ExitCode::from(EXIT_ERROR)
            }
        }
    }
}
