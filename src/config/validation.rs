//! Static checks for a loaded directive file.
use std::path::Path;

use super::Config;
use super::copy::{self, COPY_DIRECTIVE, CopyDefaults, DEFAULTS_DIRECTIVE};
use crate::paths;

/// Directive names the bundled handlers accept.
pub const SUPPORTED_DIRECTIVES: &[&str] = &[DEFAULTS_DIRECTIVE, COPY_DIRECTIVE];

/// A validation warning detected while checking a directive file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationWarning {
    /// The directive that produced the warning (e.g., "copy #2").
    pub source: String,
    /// The specific entry that triggered the warning.
    pub item: String,
    /// Human-readable warning message.
    pub message: String,
}

impl ValidationWarning {
    /// Build a warning from anything string-like.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        item: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            item: item.into(),
            message: message.into(),
        }
    }
}

/// Trait for configuration validators.
///
/// Implementations inspect a loaded [`Config`] and may read the filesystem,
/// but never write to it.
pub trait ConfigValidator {
    /// Validate the configuration and return any warnings found.
    fn validate(&self, config: &Config, home: &Path) -> Vec<ValidationWarning>;

    /// Return a human-readable name for this validator (e.g., "copy").
    fn name(&self) -> &'static str;
}

/// Flags directives that no bundled handler supports.
#[derive(Debug)]
pub struct DirectiveNameValidator<'a> {
    known: &'a [&'a str],
}

impl<'a> DirectiveNameValidator<'a> {
    /// Accept only directive names in `known`.
    #[must_use]
    pub const fn new(known: &'a [&'a str]) -> Self {
        Self { known }
    }
}

impl ConfigValidator for DirectiveNameValidator<'_> {
    fn validate(&self, config: &Config, _home: &Path) -> Vec<ValidationWarning> {
        config
            .directives
            .iter()
            .enumerate()
            .filter(|(_, d)| !self.known.contains(&d.name.as_str()))
            .map(|(i, d)| {
                ValidationWarning::new(
                    label(&d.name, i),
                    &d.name,
                    "unsupported directive; no handler will process it",
                )
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "directives"
    }
}

/// Checks `defaults` and `copy` payloads the way the copy handler will see
/// them, tracking defaults across directives in file order.
#[derive(Debug)]
pub struct CopyValidator;

impl ConfigValidator for CopyValidator {
    fn validate(&self, config: &Config, home: &Path) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();
        let mut defaults = CopyDefaults::default();

        for (i, directive) in config.directives.iter().enumerate() {
            let source = label(&directive.name, i);
            match directive.name.as_str() {
                DEFAULTS_DIRECTIVE => match copy::parse_defaults(&directive.data) {
                    Ok(parsed) => defaults = parsed,
                    Err(e) => warnings.push(ValidationWarning::new(
                        &source,
                        DEFAULTS_DIRECTIVE,
                        e.to_string(),
                    )),
                },
                COPY_DIRECTIVE => {
                    check_copy(&directive.data, &defaults, config, home, &source, &mut warnings);
                }
                _ => {}
            }
        }

        warnings
    }

    fn name(&self) -> &'static str {
        "copy"
    }
}

fn check_copy(
    data: &serde_json::Value,
    defaults: &CopyDefaults,
    config: &Config,
    home: &Path,
    source: &str,
    warnings: &mut Vec<ValidationWarning>,
) {
    let entries = match copy::parse_entries(data) {
        Ok(entries) => entries,
        Err(e) => {
            warnings.push(ValidationWarning::new(source, COPY_DIRECTIVE, e.to_string()));
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(malformed) => {
                warnings.push(ValidationWarning::new(
                    source,
                    malformed.destination,
                    malformed.message,
                ));
                continue;
            }
        };
        let resolved = entry.resolve(defaults, home, &config.base_dir);

        if !resolved.source.exists() {
            warnings.push(ValidationWarning::new(
                source,
                &entry.destination,
                format!("source does not exist: {}", resolved.source.display()),
            ));
        }

        for (what, path) in [("source", &resolved.source), ("destination", &resolved.destination)] {
            if !paths::is_within(path, home) {
                warnings.push(ValidationWarning::new(
                    source,
                    &entry.destination,
                    format!("{what} {} is outside of the home directory", path.display()),
                ));
            }
        }

        if !resolved.create
            && let Some(parent) = resolved.destination.parent()
            && !parent.is_dir()
        {
            warnings.push(ValidationWarning::new(
                source,
                &entry.destination,
                format!(
                    "parent directory {} does not exist and create is off",
                    parent.display()
                ),
            ));
        }
    }
}

/// Human-readable position of a directive, 1-based.
fn label(name: &str, index: usize) -> String {
    format!("{name} #{}", index + 1)
}

/// Run all validators against a loaded configuration.
#[must_use]
pub fn validate_all(config: &Config, home: &Path) -> Vec<ValidationWarning> {
    let validators: Vec<Box<dyn ConfigValidator>> = vec![
        Box::new(DirectiveNameValidator::new(SUPPORTED_DIRECTIVES)),
        Box::new(CopyValidator),
    ];

    let mut all_warnings = Vec::new();
    for validator in validators {
        let warnings = validator.validate(config, home);
        tracing::debug!(
            validator = validator.name(),
            count = warnings.len(),
            "validator finished"
        );
        all_warnings.extend(warnings);
    }

    all_warnings
}
