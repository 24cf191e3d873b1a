//! Copy directive payloads.
use serde::Deserialize;
use serde_json::Value;
use std::path::{Path, PathBuf};

use crate::error::DirectiveError;
use crate::paths;

/// Name of the directive that copies files.
pub const COPY_DIRECTIVE: &str = "copy";

/// Name of the directive that sets option defaults.
pub const DEFAULTS_DIRECTIVE: &str = "defaults";

/// Options a `defaults` directive may set for later `copy` entries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyDefaults {
    /// Replace existing destinations.
    pub overwrite: Option<bool>,
    /// Create missing parent directories of the destination.
    pub create: Option<bool>,
}

/// Per-entry options in the mapping form of a source spec.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyOptions {
    /// Source path; empty or absent means "derive from the destination".
    #[serde(default)]
    pub path: Option<String>,
    /// Entry-level override of [`CopyDefaults::overwrite`].
    pub overwrite: Option<bool>,
    /// Entry-level override of [`CopyDefaults::create`].
    pub create: Option<bool>,
}

/// The value side of a `copy` entry: either a plain source path or an
/// options mapping.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    /// Plain string: `"~/.vimrc" = "vimrc"`.
    Bare(String),
    /// Structured: `{ path = "vimrc", overwrite = true }`.
    Options(CopyOptions),
}

impl Default for SourceSpec {
    fn default() -> Self {
        Self::Options(CopyOptions::default())
    }
}

impl SourceSpec {
    /// The configured source path, empty when not given.
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::Bare(path) => path,
            Self::Options(opts) => opts.path.as_deref().unwrap_or_default(),
        }
    }

    const fn overwrite(&self) -> Option<bool> {
        match self {
            Self::Bare(_) => None,
            Self::Options(opts) => opts.overwrite,
        }
    }

    const fn create(&self) -> Option<bool> {
        match self {
            Self::Bare(_) => None,
            Self::Options(opts) => opts.create,
        }
    }
}

/// A `copy` entry whose value could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedEntry {
    /// Destination path as written in the configuration.
    pub destination: String,
    /// Why the value was rejected.
    pub message: String,
}

/// One `destination -> source` pair from a `copy` directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CopyEntry {
    /// Destination path as written in the configuration.
    pub destination: String,
    /// Parsed source spec.
    pub spec: SourceSpec,
}

/// A copy entry with every option decided and both paths absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedEntry {
    /// Absolute destination path.
    pub destination: PathBuf,
    /// Absolute source path.
    pub source: PathBuf,
    /// Effective overwrite flag.
    pub overwrite: bool,
    /// Effective create flag.
    pub create: bool,
}

impl CopyEntry {
    /// Decide options and expand both paths.
    ///
    /// Entry options win over `defaults`; unset options are `false`. An
    /// empty source falls back to [`default_source`] of the destination.
    #[must_use]
    pub fn resolve(&self, defaults: &CopyDefaults, home: &Path, base: &Path) -> ResolvedEntry {
        let source = match self.spec.path() {
            "" => default_source(&self.destination),
            path => path.to_string(),
        };
        ResolvedEntry {
            destination: paths::expand(&self.destination, home, base),
            source: paths::expand(&source, home, base),
            overwrite: self
                .spec
                .overwrite()
                .or(defaults.overwrite)
                .unwrap_or(false),
            create: self.spec.create().or(defaults.create).unwrap_or(false),
        }
    }
}

/// Derive a source name from a destination: its final component with a
/// single leading `.` removed.
///
/// # Examples
///
/// ```
/// use dotfiles_copy::config::copy::default_source;
///
/// assert_eq!(default_source("~/.bashrc"), "bashrc");
/// assert_eq!(default_source("~/.config/tool"), "tool");
/// assert_eq!(default_source("~/..hidden"), ".hidden");
/// ```
#[must_use]
pub fn default_source(destination: &str) -> String {
    let trimmed = destination.trim_end_matches(['/', '\\']);
    let name = trimmed.rsplit(['/', '\\']).next().unwrap_or(trimmed);
    name.strip_prefix('.').unwrap_or(name).to_string()
}

/// Read the copy defaults out of a `defaults` directive payload.
///
/// A missing or null `copy` key yields empty defaults. Other keys belong to
/// other directives and are ignored.
///
/// # Errors
///
/// Returns [`DirectiveError::InvalidPayload`] if the payload is not a
/// mapping or its `copy` value does not describe [`CopyDefaults`].
pub fn parse_defaults(data: &Value) -> Result<CopyDefaults, DirectiveError> {
    let copy = match data {
        Value::Null => return Ok(CopyDefaults::default()),
        Value::Object(map) => map.get(COPY_DIRECTIVE),
        _ => return Err(invalid(DEFAULTS_DIRECTIVE, "expected a mapping")),
    };
    match copy {
        None => Ok(CopyDefaults::default()),
        Some(value) => Option::<CopyDefaults>::deserialize(value)
            .map(Option::unwrap_or_default)
            .map_err(|e| invalid(DEFAULTS_DIRECTIVE, format!("copy: {e}"))),
    }
}

/// Split a `copy` directive payload into entries, in file order.
///
/// Entries are parsed independently so one malformed value does not hide
/// the others.
///
/// # Errors
///
/// Returns [`DirectiveError::InvalidPayload`] if the payload is neither a
/// mapping nor null.
pub fn parse_entries(
    data: &Value,
) -> Result<Vec<Result<CopyEntry, MalformedEntry>>, DirectiveError> {
    let map = match data {
        Value::Null => return Ok(Vec::new()),
        Value::Object(map) => map,
        _ => return Err(invalid(COPY_DIRECTIVE, "expected a mapping of destination to source")),
    };
    Ok(map
        .iter()
        .map(|(destination, value)| {
            Option::<SourceSpec>::deserialize(value)
                .map(|spec| CopyEntry {
                    destination: destination.clone(),
                    spec: spec.unwrap_or_default(),
                })
                .map_err(|_| MalformedEntry {
                    destination: destination.clone(),
                    message: "expected a source path or a mapping of path, overwrite, create"
                        .to_string(),
                })
        })
        .collect())
}

fn invalid(directive: &str, message: impl Into<String>) -> DirectiveError {
    DirectiveError::InvalidPayload {
        directive: directive.to_string(),
        message: message.into(),
    }
}
