//! Directive file parsing (TOML or JSON).
use serde_json::Value;
use std::path::Path;

use super::Directive;
use crate::error::ConfigError;

/// Top-level TOML key holding the directive array.
const TOML_DIRECTIVE_KEY: &str = "directive";

/// Supported directive file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `[[directive]]` tables.
    Toml,
    /// A top-level array of single-key objects.
    Json,
}

impl Format {
    /// Pick a format from the file extension, defaulting to TOML.
    #[must_use]
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }
}

/// Read `path` and return its directives in file order.
///
/// # Errors
///
/// Returns an error if the file cannot be read, does not parse, or is not
/// laid out as a list of single-key directive objects.
pub fn load_directives(path: &Path) -> Result<Vec<Directive>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_directives(&content, Format::from_path(path), path)
}

/// Parse directive file `content` in the given `format`.
///
/// `origin` is only used for error messages.
///
/// # Errors
///
/// Returns an error if `content` does not parse or has the wrong layout.
pub fn parse_directives(
    content: &str,
    format: Format,
    origin: &Path,
) -> Result<Vec<Directive>, ConfigError> {
    let display = origin.display().to_string();
    let list = match format {
        Format::Json => serde_json::from_str::<Value>(content).map_err(|source| {
            ConfigError::Json {
                path: display.clone(),
                source,
            }
        })?,
        Format::Toml => {
            let mut table: toml::Table =
                toml::from_str(content).map_err(|source| ConfigError::Toml {
                    path: display.clone(),
                    source,
                })?;
            if let Some(key) = table.keys().find(|k| *k != TOML_DIRECTIVE_KEY) {
                return Err(layout(&display, format!("unexpected top-level key '{key}'")));
            }
            match table.remove(TOML_DIRECTIVE_KEY) {
                Some(directives) => serde_json::to_value(directives)
                    .map_err(|e| layout(&display, e.to_string()))?,
                None => Value::Array(Vec::new()),
            }
        }
    };

    let Value::Array(items) = list else {
        return Err(layout(&display, "expected a list of directives".to_string()));
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| into_directive(item, index, &display))
        .collect()
}

/// Convert one `{ name: data }` object into a [`Directive`].
fn into_directive(item: Value, index: usize, display: &str) -> Result<Directive, ConfigError> {
    let Value::Object(map) = item else {
        return Err(layout(
            display,
            format!("directive #{} is not a table", index + 1),
        ));
    };
    if map.len() != 1 {
        return Err(layout(
            display,
            format!(
                "directive #{} must have exactly one key, found {}",
                index + 1,
                map.len()
            ),
        ));
    }
    map.into_iter()
        .next()
        .map(|(name, data)| Directive { name, data })
        .ok_or_else(|| layout(display, format!("directive #{} is empty", index + 1)))
}

fn layout(display: &str, message: String) -> ConfigError {
    ConfigError::Layout {
        path: display.to_string(),
        message,
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn origin() -> &'static Path {
        Path::new("dotcopy.toml")
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a.json")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.JSON")), Format::Json);
        assert_eq!(Format::from_path(Path::new("a.toml")), Format::Toml);
        assert_eq!(Format::from_path(Path::new("noext")), Format::Toml);
    }

    #[test]
    fn parse_toml_directives_in_order() {
        let directives = parse_directives(
            r#"
[[directive]]
defaults.copy = { create = true }

[[directive]]
[directive.copy]
"~/.vimrc" = "vimrc"
"~/.config/tool" = { path = "config/tool", overwrite = true }
"#,
            Format::Toml,
            origin(),
        )
        .unwrap();

        assert_eq!(directives.len(), 2);
        assert_eq!(directives[0].name, "defaults");
        assert_eq!(directives[0].data, json!({ "copy": { "create": true } }));
        assert_eq!(directives[1].name, "copy");
        let keys: Vec<&String> = directives[1].data.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["~/.vimrc", "~/.config/tool"]);
    }

    #[test]
    fn parse_json_directives() {
        let directives = parse_directives(
            r#"[{"defaults": {"copy": {"overwrite": true}}}, {"copy": {"~/.bashrc": null}}]"#,
            Format::Json,
            Path::new("dotcopy.json"),
        )
        .unwrap();
        assert_eq!(directives.len(), 2);
        assert_eq!(directives[1].data, json!({ "~/.bashrc": null }));
    }

    #[test]
    fn empty_toml_yields_no_directives() {
        let directives = parse_directives("", Format::Toml, origin()).unwrap();
        assert!(directives.is_empty());
    }

    #[test]
    fn toml_rejects_unknown_top_level_key() {
        let err = parse_directives("[copy]\n\"~/.a\" = \"a\"\n", Format::Toml, origin())
            .unwrap_err();
        assert!(err.to_string().contains("unexpected top-level key 'copy'"));
    }

    #[test]
    fn json_rejects_non_array() {
        let err = parse_directives(r#"{"copy": {}}"#, Format::Json, origin()).unwrap_err();
        assert!(err.to_string().contains("expected a list of directives"));
    }

    #[test]
    fn rejects_multi_key_directive() {
        let err = parse_directives(
            r#"[{"copy": {}, "defaults": {}}]"#,
            Format::Json,
            origin(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("exactly one key, found 2"));
    }

    #[test]
    fn rejects_scalar_directive() {
        let err = parse_directives(r#"["copy"]"#, Format::Json, origin()).unwrap_err();
        assert!(err.to_string().contains("directive #1 is not a table"));
    }

    #[test]
    fn invalid_toml_is_reported() {
        let err = parse_directives("[[directive", Format::Toml, origin()).unwrap_err();
        assert!(matches!(err, ConfigError::Toml { .. }));
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_directives(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn load_reads_file_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dotcopy.json");
        std::fs::write(&path, r#"[{"copy": {"~/.a": "a"}}]"#).unwrap();
        let directives = load_directives(&path).unwrap();
        assert_eq!(directives[0].name, "copy");
    }
}
