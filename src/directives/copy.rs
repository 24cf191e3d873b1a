//! The `copy` and `defaults` directive handler.
use serde_json::Value;
use std::path::{Path, PathBuf};

use super::{Context, DirectiveHandler};
use crate::config::copy::{
    COPY_DIRECTIVE, CopyDefaults, CopyEntry, DEFAULTS_DIRECTIVE, ResolvedEntry, parse_defaults,
    parse_entries,
};
use crate::error::{CopyError, DirectiveError};
use crate::paths;
use crate::resources::copy::{CopyResource, Overlap, SAME_PATH};
use crate::resources::fs::ensure_parent_dir;
use crate::resources::{Applicable as _, Resource as _, ResourceChange, ResourceState};

/// Copies files and directory trees into the home directory.
///
/// Handles two directives:
///
/// - `defaults`: replaces the stored [`CopyDefaults`] with the payload's
///   `copy` section.
/// - `copy`: processes each `destination -> source` entry in order. Both
///   paths must resolve inside the home directory. Existing destinations
///   are skipped unless `overwrite` is set, and missing parent directories
///   are created only when `create` is set.
///
/// Entry failures are logged and make the directive return `Ok(false)`;
/// later entries still run.
#[derive(Debug)]
pub struct CopyHandler {
    ctx: Context,
    defaults: CopyDefaults,
    home_real: PathBuf,
}

/// What happened to a single entry that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Outcome {
    Copied,
    Skipped(String),
}

impl CopyHandler {
    /// Create a handler with empty defaults.
    #[must_use]
    pub fn new(ctx: Context) -> Self {
        let home_real = paths::resolve_real_path(&ctx.home);
        Self {
            ctx,
            defaults: CopyDefaults::default(),
            home_real,
        }
    }

    /// The defaults currently applied to entries without their own options.
    #[must_use]
    pub const fn defaults(&self) -> &CopyDefaults {
        &self.defaults
    }

    fn copy_all(&self, data: &Value) -> Result<bool, DirectiveError> {
        let mut success = true;
        for entry in parse_entries(data)? {
            match entry {
                Ok(entry) => success &= self.copy_one(&entry),
                Err(malformed) => {
                    self.ctx.log.error(&format!(
                        "Invalid copy entry {}: {}",
                        malformed.destination, malformed.message
                    ));
                    success = false;
                }
            }
        }
        Ok(success)
    }

    /// Process one entry, logging its outcome. Returns `false` on failure.
    fn copy_one(&self, entry: &CopyEntry) -> bool {
        let resolved = entry.resolve(&self.defaults, &self.ctx.home, &self.ctx.base_dir);
        let (src, dst) = (resolved.source.display(), resolved.destination.display());

        if let Err(e) = self.check_safe(&resolved) {
            self.ctx.log.error(&e.to_string());
            return false;
        }

        match self.place(&resolved) {
            Ok(Outcome::Copied) if self.ctx.dry_run => {
                self.ctx.log.dry_run(&format!("Would copy {src} -> {dst}"));
                true
            }
            Ok(Outcome::Copied) => {
                self.ctx.log.info(&format!("Copied {src} -> {dst}"));
                true
            }
            Ok(Outcome::Skipped(reason)) => {
                self.ctx.log.info(&format!("Skipping {dst} ({reason})"));
                true
            }
            Err(e) => {
                self.ctx
                    .log
                    .error(&format!("Error copying {src} -> {dst}: {e:#}"));
                false
            }
        }
    }

    /// Reject entries whose real source or destination leaves the home
    /// directory.
    fn check_safe(&self, resolved: &ResolvedEntry) -> Result<(), CopyError> {
        for path in [&resolved.source, &resolved.destination] {
            let real = paths::resolve_real_path(path);
            if !real.starts_with(&self.home_real) {
                return Err(CopyError::UnsafePath {
                    path: real,
                    home: self.home_real.clone(),
                });
            }
        }
        Ok(())
    }

    /// Prepare the parent directory, honor `overwrite`, and copy.
    ///
    /// An existing destination without `overwrite` is skipped before the
    /// source is looked at.
    fn place(&self, resolved: &ResolvedEntry) -> anyhow::Result<Outcome> {
        self.prepare_parent(resolved)?;

        let resource = CopyResource::new(resolved.source.clone(), resolved.destination.clone());
        if !resolved.overwrite && resource.target_exists() {
            return Ok(Outcome::Skipped("file exists".to_string()));
        }
        if let ResourceState::Invalid { .. } = resource.current_state()? {
            return Err(CopyError::SourceMissing(resolved.source.clone()).into());
        }
        match resource.overlap() {
            Overlap::Same => return Ok(Outcome::Skipped(SAME_PATH.to_string())),
            Overlap::Nested => {
                return Err(CopyError::Overlap {
                    from: resolved.source.clone(),
                    to: resolved.destination.clone(),
                }
                .into());
            }
            Overlap::Disjoint => {}
        }
        if self.ctx.dry_run {
            return Ok(Outcome::Copied);
        }
        match resource.apply()? {
            ResourceChange::Applied => Ok(Outcome::Copied),
            ResourceChange::Skipped { reason } => Ok(Outcome::Skipped(reason)),
        }
    }

    fn prepare_parent(&self, resolved: &ResolvedEntry) -> anyhow::Result<()> {
        let Some(parent) = resolved.destination.parent() else {
            return Ok(());
        };
        if parent.is_dir() {
            return Ok(());
        }
        if !resolved.create {
            return Err(CopyError::MissingParent(parent.to_path_buf()).into());
        }
        if self.ctx.dry_run {
            self.ctx
                .log
                .dry_run(&format!("Would create directory {}", parent.display()));
            return Ok(());
        }
        ensure_parent_dir(&resolved.destination)?;
        self.ctx
            .log
            .debug(&format!("created directory {}", parent.display()));
        Ok(())
    }

    /// Directory the handler resolves relative paths against.
    #[must_use]
    pub fn base_dir(&self) -> &Path {
        &self.ctx.base_dir
    }
}

impl DirectiveHandler for CopyHandler {
    fn can_handle(&self, directive: &str) -> bool {
        directive == COPY_DIRECTIVE || directive == DEFAULTS_DIRECTIVE
    }

    fn handle(&mut self, directive: &str, data: &Value) -> Result<bool, DirectiveError> {
        match directive {
            DEFAULTS_DIRECTIVE => {
                self.defaults = parse_defaults(data)?;
                self.ctx
                    .log
                    .debug(&format!("copy defaults set to {:?}", self.defaults));
                Ok(true)
            }
            COPY_DIRECTIVE => self.copy_all(data),
            other => Err(DirectiveError::Unsupported(other.to_string())),
        }
    }
}
