//! Debug-scan reporting.
//!
//! Classifies a scan outcome into advisory warning lines. This is
//! advisory output only: it never aborts or fails the build. CI systems
//! that want to act on it scrape the log for the unstable marker.

use crate::env::Environment;
use crate::tasks::scan::ScanResult;

/// The line CI scrapes to mark a build unstable without failing it.
///
/// Downstream log-scraping integrations match this text verbatim.
pub const UNSTABLE_MARKER: &str = "JENKINS: MARK BUILD AS UNSTABLE";

/// The advisory warning lines for a scan outcome, in emit order.
///
/// Empty when the scan is clean. Otherwise the first line carries the
/// match count; on CI a second line carries the unstable marker.
pub fn advisories(result: &ScanResult, env: Environment) -> Vec<String> {
    if result.num_matches == 0 {
        return Vec::new();
    }

    let mut lines = vec![format!("{} debug message(s) found!!!", result.num_matches)];
    if env.is_ci() {
        lines.push(UNSTABLE_MARKER.to_string());
    }
    lines
}

/// Emit the advisory warnings for a scan outcome to stderr.
pub fn report(result: &ScanResult, env: Environment) {
    for line in advisories(result, env) {
        eprintln!("{}", line);
    }
}
