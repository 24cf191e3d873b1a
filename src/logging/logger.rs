//! Structured logger with directive summary collection.
use std::path::PathBuf;
use std::sync::Mutex;

use super::subscriber::{DRY_RUN_TARGET, STAGE_TARGET};
use super::types::{DirectiveEntry, DirectiveStatus, Log};
use super::utils::log_file_path;

/// Implement the display methods of [`Log`] by delegating to inherent methods
/// of the same name on the implementing type.
///
/// The `record_directive` method is **not** included because its signature
/// differs from the `fn(&self, &str)` pattern shared by the display methods.
macro_rules! forward_log_methods {
    ($($method:ident),+ $(,)?) => {
        $(
            fn $method(&self, msg: &str) {
                self.$method(msg);
            }
        )+
    };
}

/// Structured logger with summary collection.
///
/// Messages are emitted as [`tracing`] events; the subscriber installed by
/// [`init_subscriber`](super::init_subscriber) renders them on the console
/// and appends them to `$XDG_CACHE_HOME/dotcopy/<command>.log`.
#[derive(Debug)]
pub struct Logger {
    entries: Mutex<Vec<DirectiveEntry>>,
    log_file: Option<PathBuf>,
}

impl Logger {
    /// Create a new logger for `command`.
    ///
    /// Stores the log file path for display in the run summary; the file
    /// itself is created by the subscriber.
    #[must_use]
    pub fn new(command: &str) -> Self {
        Self::with_log_file(log_file_path(command))
    }

    /// Create a logger that reports `log_file` in its summary.
    #[must_use]
    pub const fn with_log_file(log_file: Option<PathBuf>) -> Self {
        Self {
            entries: Mutex::new(Vec::new()),
            log_file,
        }
    }

    /// Return the log file path, if available.
    #[must_use]
    pub const fn log_path(&self) -> Option<&PathBuf> {
        self.log_file.as_ref()
    }

    /// Return a clone of all recorded directive entries.
    #[must_use]
    pub fn entries(&self) -> Vec<DirectiveEntry> {
        self.entries.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    /// Log an error message.
    pub fn error(&self, msg: &str) {
        tracing::error!("{msg}");
    }

    /// Log a warning message.
    pub fn warn(&self, msg: &str) {
        tracing::warn!("{msg}");
    }

    /// Log a stage header (major section).
    pub fn stage(&self, msg: &str) {
        tracing::info!(target: STAGE_TARGET, "{msg}");
    }

    /// Log an informational message.
    pub fn info(&self, msg: &str) {
        tracing::info!("{msg}");
    }

    /// Log a debug message (suppressed on console unless verbose; always
    /// written to the log file).
    pub fn debug(&self, msg: &str) {
        tracing::debug!("{msg}");
    }

    /// Log a dry-run action message.
    pub fn dry_run(&self, msg: &str) {
        tracing::info!(target: DRY_RUN_TARGET, "{msg}");
    }

    /// Record a directive result for the summary.
    pub fn record_directive(&self, name: &str, status: DirectiveStatus, message: Option<&str>) {
        if let Ok(mut guard) = self.entries.lock() {
            guard.push(DirectiveEntry {
                name: name.to_string(),
                status,
                message: message.map(String::from),
            });
        }
    }

    /// Return `true` if any recorded directive did not succeed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failure_count() > 0
    }

    /// Count the directives that failed or were not handled.
    #[must_use]
    pub fn failure_count(&self) -> usize {
        self.entries.lock().map_or(0, |guard| {
            guard
                .iter()
                .filter(|e| e.status != DirectiveStatus::Ok)
                .count()
        })
    }

    /// Print the summary of all recorded directives.
    pub fn print_summary(&self) {
        let entries = self.entries();
        if entries.is_empty() {
            return;
        }

        self.stage("Summary");

        let mut ok = 0u32;
        let mut failed = 0u32;
        let mut unhandled = 0u32;

        for entry in &entries {
            let (icon, color) = match entry.status {
                DirectiveStatus::Ok => {
                    ok += 1;
                    ("✓", "\x1b[32m")
                }
                DirectiveStatus::Failed => {
                    failed += 1;
                    ("✗", "\x1b[31m")
                }
                DirectiveStatus::Unhandled => {
                    unhandled += 1;
                    ("?", "\x1b[33m")
                }
            };

            let suffix = entry
                .message
                .as_ref()
                .map_or_else(String::new, |msg| format!(" ({msg})"));

            self.info(&format!("{color}{icon} {}{suffix}\x1b[0m", entry.name));
        }

        let total = ok + failed + unhandled;
        self.info(&format!(
            "{total} directives: \x1b[32m{ok} ok\x1b[0m, \x1b[31m{failed} failed\x1b[0m, \x1b[33m{unhandled} unhandled\x1b[0m"
        ));

        if let Some(path) = &self.log_file {
            self.info(&format!("\x1b[2mlog: {}\x1b[0m", path.display()));
        }
    }
}

impl Log for Logger {
    forward_log_methods!(stage, info, debug, warn, error, dry_run);

    fn record_directive(&self, name: &str, status: DirectiveStatus, message: Option<&str>) {
        self.record_directive(name, status, message);
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::isolated_logger;
    use std::fs;

    fn log_contents(log: &Logger) -> String {
        fs::read_to_string(log.log_path().expect("log path")).unwrap()
    }

    #[test]
    fn logger_new_has_no_entries() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log.entries().is_empty(), "expected empty entry list");
    }

    #[test]
    fn record_directive_with_message() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_directive("copy", DirectiveStatus::Failed, Some("boom"));
        let entries = log.entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].name, "copy");
        assert_eq!(entries[0].message.as_deref(), Some("boom"));
    }

    #[test]
    fn failure_count_includes_unhandled() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(!log.has_failures());
        log.record_directive("defaults", DirectiveStatus::Ok, None);
        log.record_directive("copy", DirectiveStatus::Failed, None);
        log.record_directive("link", DirectiveStatus::Unhandled, None);
        assert_eq!(log.failure_count(), 2);
        assert!(log.has_failures());
    }

    #[test]
    fn log_trait_delegates_to_logger() {
        let (log, _tmp, _guard) = isolated_logger();
        let log_ref: &dyn Log = &log;
        log_ref.record_directive("via-trait", DirectiveStatus::Ok, None);
        assert_eq!(log.entries().len(), 1);
    }

    #[test]
    fn log_file_has_header() {
        let (log, _tmp, _guard) = isolated_logger();
        assert!(log_contents(&log).contains("Dotcopy "));
    }

    #[test]
    fn levels_are_tagged_in_file() {
        let (log, _tmp, _guard) = isolated_logger();
        log.debug("debug-marker");
        log.warn("warn-marker");
        log.error("error-marker");
        log.dry_run("dry-marker");
        log.stage("stage-marker");
        log.info("\x1b[32minfo-marker\x1b[0m");

        let contents = log_contents(&log);
        assert!(contents.contains("[debug] debug-marker"));
        assert!(contents.contains("[warn] warn-marker"));
        assert!(contents.contains("[error] error-marker"));
        assert!(contents.contains("[dry run] dry-marker"));
        assert!(contents.contains("==> stage-marker"));
        assert!(contents.contains("     info-marker"), "ANSI codes stripped");
    }

    #[test]
    fn summary_lists_directives_and_totals() {
        let (log, _tmp, _guard) = isolated_logger();
        log.record_directive("defaults", DirectiveStatus::Ok, None);
        log.record_directive("copy", DirectiveStatus::Failed, Some("one or more entries failed"));
        log.print_summary();

        let contents = log_contents(&log);
        assert!(contents.contains("==> Summary"));
        assert!(contents.contains("✓ defaults"));
        assert!(contents.contains("✗ copy (one or more entries failed)"));
        assert!(contents.contains("2 directives: 1 ok, 1 failed, 0 unhandled"));
    }

    #[test]
    fn empty_summary_prints_nothing() {
        let (log, _tmp, _guard) = isolated_logger();
        log.print_summary();
        assert!(!log_contents(&log).contains("Summary"));
    }
}
