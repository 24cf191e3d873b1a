//! Domain-specific error types for the copy engine.
//!
//! This module provides a structured error hierarchy using [`thiserror`].
//! Internal modules return typed errors (e.g., [`ConfigError`],
//! [`DirectiveError`]) while command handlers at the CLI boundary convert
//! them to [`anyhow::Error`] via the standard `?` operator.
//!
//! # Error hierarchy
//!
//! ```text
//! ConfigError   : directive file loading and shape checks
//! DirectiveError: handler contract violations (propagated to the host)
//! CopyError     : per-entry rejections (logged, never propagated)
//! PathError     : home directory discovery
//! ```

use std::path::PathBuf;

use thiserror::Error;

/// Errors that arise while loading a directive file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("IO error reading config file {path}: {source}")]
    Io {
        /// Path to the file that could not be read.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The file is not valid TOML.
    #[error("Invalid TOML in {path}: {source}")]
    Toml {
        /// Path to the offending file.
        path: String,
        /// Underlying parse error.
        source: toml::de::Error,
    },

    /// The file is not valid JSON.
    #[error("Invalid JSON in {path}: {source}")]
    Json {
        /// Path to the offending file.
        path: String,
        /// Underlying parse error.
        source: serde_json::Error,
    },

    /// The file parsed but its layout is not a list of directives.
    #[error("Invalid directive layout in {path}: {message}")]
    Layout {
        /// Path to the offending file.
        path: String,
        /// Human-readable description of the problem.
        message: String,
    },
}

/// Errors a directive handler raises instead of returning a result.
///
/// These signal configuration or integration defects and are never caught
/// by the handler itself.
#[derive(Error, Debug)]
pub enum DirectiveError {
    /// The handler was asked to process a directive it does not support.
    #[error("cannot handle directive '{0}'")]
    Unsupported(String),

    /// The directive payload does not have the expected shape.
    #[error("invalid payload for directive '{directive}': {message}")]
    InvalidPayload {
        /// Name of the directive.
        directive: String,
        /// Human-readable description of the problem.
        message: String,
    },
}

/// Reasons a single copy entry is rejected before any copy happens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CopyError {
    /// A resolved path lies outside the home directory.
    #[error("{} is outside of the home directory {}", path.display(), home.display())]
    UnsafePath {
        /// The offending resolved path.
        path: PathBuf,
        /// The resolved home directory.
        home: PathBuf,
    },

    /// The destination's parent directory is missing and `create` is off.
    #[error("parent directory {} does not exist (set create to make it)", .0.display())]
    MissingParent(PathBuf),

    /// The source path does not exist.
    #[error("source does not exist: {}", .0.display())]
    SourceMissing(PathBuf),

    /// One of source and destination lies inside the other.
    #[error("source {} and destination {} contain one another", from.display(), to.display())]
    Overlap {
        /// The source path.
        from: PathBuf,
        /// The destination path.
        to: PathBuf,
    },
}

/// Errors from path discovery.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    /// Neither `HOME` nor `USERPROFILE` is set.
    #[error("cannot determine home directory: {0}")]
    NoHome(String),
}
