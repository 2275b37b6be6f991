//! File selector sets.
//!
//! Tasks declare which files they touch as an ordered list of glob
//! patterns. A leading `!` marks an exclusion: selection first collects
//! everything the inclusion patterns match, then drops anything an
//! exclusion pattern matches. The result is deterministic (sorted, no
//! duplicates).

use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use crate::config::ConfigError;

/// An ordered set of inclusion and exclusion glob patterns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSelector {
    patterns: Vec<String>,
}

impl FileSelector {
    /// Create a selector from a pattern list.
    pub fn new<I, S>(patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self { patterns: patterns.into_iter().map(Into::into).collect() }
    }

    /// The default scan set: every script source except dependency
    /// directories and any `lib` subdirectory.
    pub fn script_sources() -> Self {
        Self::new(["**/*.js", "!node_modules/**", "!**/lib/**"])
    }

    /// All stylesheet sources under the given source directory.
    pub fn stylesheet_sources(scss_dir: &str) -> Self {
        Self::new([format!("{}/**/*.scss", scss_dir)])
    }

    /// The raw pattern list, in declaration order.
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    /// Inclusion patterns only.
    pub fn includes(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().filter(|p| !p.starts_with('!')).map(|p| p.as_str())
    }

    /// Exclusion patterns only, with the `!` prefix stripped.
    pub fn excludes(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().filter_map(|p| p.strip_prefix('!'))
    }

    /// Select matching files under `root`.
    ///
    /// Exclusions are matched against paths relative to `root`. Only
    /// regular files are returned.
    pub fn select(&self, root: &Path) -> Result<Vec<PathBuf>, ConfigError> {
        let options = MatchOptions::new();

        let excludes: Vec<Pattern> =
            self.excludes().map(Pattern::new).collect::<Result<_, _>>()?;

        let mut selected = Vec::new();
        for include in self.includes() {
            let full_pattern = root.join(include);
            let full_pattern = full_pattern.to_string_lossy();
            for entry in glob::glob(&full_pattern)? {
                let path = match entry {
                    Ok(p) => p,
                    // Unreadable directory entries are skipped, not fatal
                    Err(_) => continue,
                };
                if !path.is_file() {
                    continue;
                }
                let relative = path.strip_prefix(root).unwrap_or(&path);
                if excludes.iter().any(|p| p.matches_path_with(relative, options)) {
                    continue;
                }
                selected.push(path);
            }
        }

        selected.sort();
        selected.dedup();
        Ok(selected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "// stub\n").unwrap();
    }

    #[test]
    fn test_script_sources_patterns() {
        let selector = FileSelector::script_sources();
        assert_eq!(selector.patterns(), &["**/*.js", "!node_modules/**", "!**/lib/**"]);
    }

    #[test]
    fn test_includes_and_excludes_split() {
        let selector = FileSelector::script_sources();
        assert_eq!(selector.includes().collect::<Vec<_>>(), vec!["**/*.js"]);
        assert_eq!(selector.excludes().collect::<Vec<_>>(), vec!["node_modules/**", "**/lib/**"]);
    }

    #[test]
    fn test_select_includes_scripts() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app.js");
        touch(temp.path(), "widgets/menu.js");
        touch(temp.path(), "styles/site.css");

        let files = FileSelector::script_sources().select(temp.path()).unwrap();
        assert_eq!(files.len(), 2);
        assert!(files.iter().all(|p| p.extension().unwrap() == "js"));
    }

    #[test]
    fn test_select_excludes_node_modules() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app.js");
        touch(temp.path(), "node_modules/pkg/index.js");

        let files = FileSelector::script_sources().select(temp.path()).unwrap();
        assert_eq!(files, vec![temp.path().join("app.js")]);
    }

    #[test]
    fn test_select_excludes_nested_lib() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "app.js");
        touch(temp.path(), "vendor/lib/jquery.js");
        touch(temp.path(), "lib/util.js");

        let files = FileSelector::script_sources().select(temp.path()).unwrap();
        assert_eq!(files, vec![temp.path().join("app.js")]);
    }

    #[test]
    fn test_select_is_sorted_and_deduped() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "b.js");
        touch(temp.path(), "a.js");

        // Overlapping includes select the same files twice
        let selector = FileSelector::new(["**/*.js", "*.js"]);
        let files = selector.select(temp.path()).unwrap();
        assert_eq!(files, vec![temp.path().join("a.js"), temp.path().join("b.js")]);
    }

    #[test]
    fn test_stylesheet_sources() {
        let temp = TempDir::new().unwrap();
        touch(temp.path(), "assets/scss/style.scss");
        touch(temp.path(), "assets/scss/partials/_nav.scss");
        touch(temp.path(), "assets/css/style.css");

        let selector = FileSelector::stylesheet_sources("assets/scss");
        let files = selector.select(temp.path()).unwrap();
        assert_eq!(files.len(), 2);
    }

    #[test]
    fn test_select_empty_dir() {
        let temp = TempDir::new().unwrap();
        let files = FileSelector::script_sources().select(temp.path()).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_select_bad_exclusion_pattern() {
        let temp = TempDir::new().unwrap();
        let selector = FileSelector::new(["**/*.js", "!["]);
        assert!(selector.select(temp.path()).is_err());
    }
}
