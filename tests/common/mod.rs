// Shared helpers for integration tests.
//
// Provides a temporary home directory containing a dotfiles repository and
// helpers to write directive files and sources into it, so each integration
// test runs against an isolated filesystem.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dotfiles_copy::cli::GlobalOpts;
use dotfiles_copy::logging::{DirectiveStatus, Logger};

/// An isolated home directory backed by a [`tempfile::TempDir`].
///
/// Layout:
/// - `<tmp>/home/`          home directory handed to the command
/// - `<tmp>/home/dotfiles/` repository holding sources and the directive file
/// - `<tmp>/outside/`       a directory outside the home directory
pub struct TestEnv {
    dir: tempfile::TempDir,
    /// Home directory.
    pub home: PathBuf,
    /// Repository directory inside the home directory.
    pub repo: PathBuf,
}

impl TestEnv {
    /// Create the home and repository directories.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let root = dunce::canonicalize(dir.path()).expect("canonicalize temp dir");
        let home = root.join("home");
        let repo = home.join("dotfiles");
        std::fs::create_dir_all(&repo).expect("create repo dir");
        std::fs::create_dir_all(root.join("outside")).expect("create outside dir");
        Self { dir, home, repo }
    }

    /// A directory outside the home directory.
    pub fn outside(&self) -> PathBuf {
        self.home.parent().expect("home has a parent").join("outside")
    }

    /// Write a source file under the repository, creating parents.
    pub fn source(&self, rel: &str, contents: &str) -> PathBuf {
        let path = self.repo.join(rel);
        write(&path, contents);
        path
    }

    /// Write the directive file under the repository and return its path.
    pub fn config(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.repo.join(name);
        write(&path, contents);
        path
    }

    /// Global options pointing at `config` with this environment's home.
    pub fn opts(&self, config: &Path) -> GlobalOpts {
        GlobalOpts {
            config: Some(config.to_path_buf()),
            home: Some(self.home.clone()),
            ..GlobalOpts::default()
        }
    }

    /// Path inside the home directory.
    pub fn home_path(&self, rel: &str) -> PathBuf {
        self.home.join(rel)
    }

    /// Read a file inside the home directory.
    pub fn read_home(&self, rel: &str) -> String {
        std::fs::read_to_string(self.home.join(rel)).expect("read home file")
    }
}

/// Write `contents` to `path`, creating parent directories.
pub fn write(path: &Path, contents: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("create parent dir");
    }
    std::fs::write(path, contents).expect("write file");
}

/// A logger that does not write a log file.
pub fn logger() -> Arc<Logger> {
    Arc::new(Logger::with_log_file(None))
}

/// Render recorded directive outcomes one per line, for snapshots.
pub fn outcomes(log: &Logger) -> String {
    log.entries()
        .iter()
        .map(|e| {
            let status = match e.status {
                DirectiveStatus::Ok => "ok",
                DirectiveStatus::Failed => "failed",
                DirectiveStatus::Unhandled => "unhandled",
            };
            match &e.message {
                Some(msg) => format!("{} {status} ({msg})", e.name),
                None => format!("{} {status}", e.name),
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
