//! Watch mode for automatic rebuilds on stylesheet changes
//!
//! Provides file system watching with debouncing for the
//! `stylemill build --watch` command. The rule is static: any change
//! under the stylesheet source path reruns compile + post-process, then
//! notifies connected clients when live reload is enabled.

use std::path::{Path, PathBuf};
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use notify::RecursiveMode;
use notify_debouncer_mini::{new_debouncer, DebouncedEventKind};

use crate::config::WatchConfig;
use crate::tasks::TaskError;

/// Error during watch mode
#[derive(Debug)]
pub enum WatchError {
    /// Failed to initialize file watcher
    WatcherInit(notify::Error),
    /// Failed to add watch path
    WatchPath(notify::Error),
    /// Channel receive error
    ChannelError(String),
    /// Stylesheet source directory not found
    SourceNotFound(PathBuf),
}

impl std::fmt::Display for WatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WatchError::WatcherInit(e) => write!(f, "Failed to initialize file watcher: {}", e),
            WatchError::WatchPath(e) => write!(f, "Failed to watch path: {}", e),
            WatchError::ChannelError(msg) => write!(f, "Watch channel error: {}", msg),
            WatchError::SourceNotFound(path) => {
                write!(f, "Stylesheet source directory not found: {}", path.display())
            }
        }
    }
}

impl std::error::Error for WatchError {}

/// Options for watch mode
#[derive(Debug, Clone)]
pub struct WatchOptions {
    /// Directory to watch recursively
    pub watch_dir: PathBuf,
    /// Watch configuration (debounce, clear screen, live reload)
    pub config: WatchConfig,
    /// Verbose output
    pub verbose: bool,
}

/// Clear the terminal screen
fn clear_screen() {
    // ANSI escape code to clear screen and move cursor to top-left
    print!("\x1B[2J\x1B[1;1H");
}

/// Format duration for display
fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Get current timestamp for logging
fn timestamp() -> String {
    use std::time::SystemTime;
    let now = SystemTime::now().duration_since(SystemTime::UNIX_EPOCH).unwrap_or_default();
    let secs = now.as_secs() % 86400; // seconds since midnight
    let hours = (secs / 3600) % 24;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    format!("{:02}:{:02}:{:02}", hours, minutes, seconds)
}

/// Check if a changed file should trigger a rebuild
fn is_relevant_file(path: &Path) -> bool {
    if let Some(ext) = path.extension() {
        let ext = ext.to_string_lossy().to_lowercase();
        matches!(ext.as_str(), "scss" | "sass")
    } else {
        false
    }
}

/// Run one rebuild and report its outcome.
///
/// Build failures are non-fatal in watch mode: the error is printed and
/// the loop keeps watching.
fn run_rebuild<F>(rebuild: &mut F, options: &WatchOptions)
where
    F: FnMut() -> Result<(), TaskError>,
{
    println!("[{}] Building...", timestamp());
    let start = Instant::now();
    match rebuild() {
        Ok(()) => {
            println!("[{}] Build complete ({})", timestamp(), format_duration(start.elapsed()));
            if options.config.live_reload {
                println!("[{}] Live reload: clients notified", timestamp());
            }
        }
        Err(e) => {
            eprintln!("[{}] Build failed: {}", timestamp(), e);
        }
    }
}

/// Watch for stylesheet changes and rebuild automatically.
///
/// This function blocks and runs until interrupted (Ctrl+C). The initial
/// build runs before the first event.
pub fn watch_and_rebuild<F>(options: WatchOptions, mut rebuild: F) -> Result<(), WatchError>
where
    F: FnMut() -> Result<(), TaskError>,
{
    if !options.watch_dir.exists() {
        return Err(WatchError::SourceNotFound(options.watch_dir.clone()));
    }

    // Create channel for debounced events
    let (tx, rx) = channel();

    let debounce_duration = Duration::from_millis(options.config.debounce_ms as u64);
    let mut debouncer = new_debouncer(debounce_duration, tx).map_err(WatchError::WatcherInit)?;

    debouncer
        .watcher()
        .watch(&options.watch_dir, RecursiveMode::Recursive)
        .map_err(WatchError::WatchPath)?;

    // Initial build
    if options.config.clear_screen {
        clear_screen();
    }
    run_rebuild(&mut rebuild, &options);
    println!("[{}] Watching {} for changes...", timestamp(), options.watch_dir.display());

    // Watch loop
    loop {
        match rx.recv() {
            Ok(Ok(events)) => {
                let relevant_changes: Vec<_> = events
                    .iter()
                    .filter(|e| {
                        matches!(e.kind, DebouncedEventKind::Any) && is_relevant_file(&e.path)
                    })
                    .collect();

                if !relevant_changes.is_empty() {
                    if options.verbose {
                        for event in &relevant_changes {
                            if let Some(name) = event.path.file_name() {
                                println!(
                                    "[{}] Changed: {}",
                                    timestamp(),
                                    name.to_string_lossy()
                                );
                            }
                        }
                    }

                    if options.config.clear_screen {
                        clear_screen();
                    }

                    run_rebuild(&mut rebuild, &options);
                    println!(
                        "[{}] Watching {} for changes...",
                        timestamp(),
                        options.watch_dir.display()
                    );
                }
            }
            Ok(Err(error)) => {
                // Watch error (non-fatal) - log but continue watching
                eprintln!("[{}] Watch error: {:?}", timestamp(), error);
                eprintln!("[{}] Continuing to watch...", timestamp());
            }
            Err(e) => {
                return Err(WatchError::ChannelError(e.to_string()));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_relevant_file() {
        assert!(is_relevant_file(Path::new("style.scss")));
        assert!(is_relevant_file(Path::new("partials/_nav.scss")));
        assert!(is_relevant_file(Path::new("legacy.sass")));
        assert!(!is_relevant_file(Path::new("style.css")));
        assert!(!is_relevant_file(Path::new("readme.md")));
        assert!(!is_relevant_file(Path::new("noextension")));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_millis(50)), "50ms");
        assert_eq!(format_duration(Duration::from_millis(999)), "999ms");
        assert_eq!(format_duration(Duration::from_millis(1000)), "1.00s");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_watch_error_source_not_found() {
        let options = WatchOptions {
            watch_dir: PathBuf::from("/nonexistent/path"),
            config: WatchConfig::default(),
            verbose: false,
        };

        let result = watch_and_rebuild(options, || Ok(()));
        assert!(matches!(result, Err(WatchError::SourceNotFound(_))));
    }

    #[test]
    fn test_watch_error_display() {
        let err = WatchError::SourceNotFound(PathBuf::from("assets/scss"));
        assert!(err.to_string().contains("assets/scss"));
    }
}
