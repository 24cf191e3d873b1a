//! Directive file loading and validation.
pub mod copy;
pub mod loader;
pub mod validation;

use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;

/// One `{ name: data }` item of a directive file.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    /// Directive name, e.g. `"copy"`.
    pub name: String,
    /// Raw payload handed to the handler.
    pub data: Value,
}

/// A loaded directive file.
#[derive(Debug, Clone)]
pub struct Config {
    /// Absolute path of the file the directives came from.
    pub path: PathBuf,
    /// Directory that relative source and destination paths resolve against.
    pub base_dir: PathBuf,
    /// Directives in file order.
    pub directives: Vec<Directive>,
}

impl Config {
    /// Load the directive file at `path`.
    ///
    /// `base_dir` overrides the default base directory, which is the
    /// directory containing the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path, base_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let path = absolute(path)?;
        let directives = loader::load_directives(&path)?;
        let base_dir = match base_dir {
            Some(dir) => absolute(dir)?,
            None => path
                .parent()
                .map_or_else(|| PathBuf::from("/"), Path::to_path_buf),
        };
        Ok(Self {
            path,
            base_dir,
            directives,
        })
    }
}

fn absolute(path: &Path) -> Result<PathBuf, ConfigError> {
    std::path::absolute(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })
}
