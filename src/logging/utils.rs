//! Utility functions for path resolution, ANSI stripping, and time formatting.
use std::fs;
use std::path::{Path, PathBuf};

/// Strip ANSI escape sequences from a string.
///
/// Handles SGR sequences (ending in `m`) and other CSI sequences (ending
/// in any letter in the `@`..`~` range), so cursor movement, erase, etc.
/// are also stripped without consuming unrelated text.
pub(super) fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\x1b' {
            if let Some(next) = chars.next()
                && next == '['
            {
                for inner in chars.by_ref() {
                    if ('@'..='~').contains(&inner) {
                        break;
                    }
                }
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Pick the cache root from `XDG_CACHE_HOME`, else `<home>/.cache`.
fn cache_root(xdg_cache_home: Option<String>, home: Option<String>) -> PathBuf {
    xdg_cache_home.filter(|v| !v.is_empty()).map_or_else(
        || {
            home.map_or_else(|| PathBuf::from("."), PathBuf::from)
                .join(".cache")
        },
        PathBuf::from,
    )
}

/// Return the `$XDG_CACHE_HOME/dotcopy/` directory, creating it if needed.
fn cache_dir() -> Option<PathBuf> {
    let root = cache_root(
        std::env::var("XDG_CACHE_HOME").ok(),
        std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .ok(),
    );
    let dir = root.join("dotcopy");
    fs::create_dir_all(&dir).ok()?;
    Some(dir)
}

/// Return the log file path under `$XDG_CACHE_HOME/dotcopy/` (or `~/.cache/dotcopy/`).
pub(super) fn log_file_path(command: &str) -> Option<PathBuf> {
    Some(log_file_in(&cache_dir()?, command))
}

/// Return the log file path for `command` inside `dir`.
pub(super) fn log_file_in(dir: &Path, command: &str) -> PathBuf {
    dir.join(format!("{command}.log"))
}

/// Format the current UTC time as `YYYY-MM-DD HH:MM:SS`.
pub(super) fn format_utc_datetime() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Format the current UTC time as `HH:MM:SS`.
pub(super) fn format_utc_time() -> String {
    chrono::Utc::now().format("%H:%M:%S").to_string()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    #[test]
    fn strip_ansi_removes_colors() {
        assert_eq!(strip_ansi("\x1b[31mERROR\x1b[0m hello"), "ERROR hello");
        assert_eq!(strip_ansi("no codes here"), "no codes here");
        assert_eq!(
            strip_ansi("\x1b[1;34m==>\x1b[0m \x1b[1mstage\x1b[0m"),
            "==> stage"
        );
    }

    #[test]
    fn strip_ansi_handles_csi_sequences() {
        assert_eq!(strip_ansi("\x1b[2;5Htext"), "text");
        assert_eq!(strip_ansi("\x1b[Kworld"), "world");
        assert_eq!(strip_ansi("\x1bMtext"), "text");
    }

    #[test]
    fn strip_ansi_empty_string() {
        assert_eq!(strip_ansi(""), "");
    }

    #[test]
    fn cache_root_prefers_xdg() {
        let root = cache_root(Some("/xdg".to_string()), Some("/home/me".to_string()));
        assert_eq!(root, PathBuf::from("/xdg"));
    }

    #[test]
    fn cache_root_falls_back_to_home() {
        let root = cache_root(None, Some("/home/me".to_string()));
        assert_eq!(root, PathBuf::from("/home/me/.cache"));
        let root = cache_root(Some(String::new()), Some("/home/me".to_string()));
        assert_eq!(root, PathBuf::from("/home/me/.cache"));
    }

    #[test]
    fn cache_root_without_any_env_is_relative() {
        assert_eq!(cache_root(None, None), PathBuf::from("./.cache"));
    }

    #[test]
    fn log_file_named_after_command() {
        assert_eq!(
            log_file_in(Path::new("/cache/dotcopy"), "install"),
            PathBuf::from("/cache/dotcopy/install.log")
        );
    }

    #[test]
    fn format_utc_time_has_correct_format() {
        let s = format_utc_time();
        assert_eq!(s.len(), 8, "HH:MM:SS should be 8 chars");
        assert_eq!(&s[2..3], ":", "colon at position 2");
        assert_eq!(&s[5..6], ":", "colon at position 5");
    }

    #[test]
    fn format_utc_datetime_has_correct_format() {
        let s = format_utc_datetime();
        assert_eq!(s.len(), 19, "YYYY-MM-DD HH:MM:SS should be 19 chars");
        assert_eq!(&s[4..5], "-", "dash at position 4");
        assert_eq!(&s[10..11], " ", "space at position 10");
    }
}
