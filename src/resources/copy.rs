//! Copy resource.
use anyhow::{Context as _, Result};
use std::path::PathBuf;

use crate::error::CopyError;
use crate::paths;

use super::fs::{copy_dir_recursive, copy_file_with_metadata, remove_existing};
use super::{Applicable, Resource, ResourceChange, ResourceState};

/// A file or directory tree to copy from `source` to `target`.
#[derive(Debug, Clone)]
pub struct CopyResource {
    /// The file or directory to copy.
    pub source: PathBuf,
    /// Where the copy is placed.
    pub target: PathBuf,
}

impl CopyResource {
    /// Create a new copy resource.
    #[must_use]
    pub const fn new(source: PathBuf, target: PathBuf) -> Self {
        Self { source, target }
    }

    /// Whether the source is a directory (following symlinks).
    #[must_use]
    pub fn is_tree(&self) -> bool {
        self.source.is_dir()
    }

    /// Whether the source exists, following symlinks.
    #[must_use]
    pub fn source_exists(&self) -> bool {
        self.source.exists()
    }

    /// Whether anything, including a dangling symlink, is at the target.
    #[must_use]
    pub fn target_exists(&self) -> bool {
        self.target.symlink_metadata().is_ok()
    }

    /// How the real source and target paths relate.
    ///
    /// The target's parent is resolved but its last component is not, so a
    /// symlink at the target is judged by where it sits, not where it points.
    #[must_use]
    pub fn overlap(&self) -> Overlap {
        let source = paths::resolve_real_path(&self.source);
        let target = match (self.target.parent(), self.target.file_name()) {
            (Some(parent), Some(name)) => paths::resolve_real_path(parent).join(name),
            _ => paths::resolve_real_path(&self.target),
        };
        if source == target {
            Overlap::Same
        } else if source.starts_with(&target) || target.starts_with(&source) {
            Overlap::Nested
        } else {
            Overlap::Disjoint
        }
    }
}

/// Relation between the source and target of a [`CopyResource`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Overlap {
    /// Neither path contains the other.
    Disjoint,
    /// Both name the same file or directory.
    Same,
    /// One path lies inside the other.
    Nested,
}

/// Skip reason for a target that is the source itself.
pub const SAME_PATH: &str = "source and target are the same path";

impl Applicable for CopyResource {
    fn description(&self) -> String {
        format!("{} -> {}", self.source.display(), self.target.display())
    }

    /// Replace whatever is at the target with a copy of the source.
    ///
    /// The parent of the target must already exist. A target that is the
    /// source itself is left alone; nested paths are refused before
    /// anything is removed.
    fn apply(&self) -> Result<ResourceChange> {
        match self.overlap() {
            Overlap::Same => {
                return Ok(ResourceChange::Skipped {
                    reason: SAME_PATH.to_string(),
                });
            }
            Overlap::Nested => {
                return Err(CopyError::Overlap {
                    from: self.source.clone(),
                    to: self.target.clone(),
                }
                .into());
            }
            Overlap::Disjoint => {}
        }
        remove_existing(&self.target)?;
        if self.is_tree() {
            copy_dir_recursive(&self.source, &self.target).with_context(|| {
                format!(
                    "recursive copy {} to {}",
                    self.source.display(),
                    self.target.display()
                )
            })?;
        } else {
            copy_file_with_metadata(&self.source, &self.target)?;
        }
        Ok(ResourceChange::Applied)
    }
}

impl Resource for CopyResource {
    fn current_state(&self) -> Result<ResourceState> {
        if !self.source_exists() {
            return Ok(ResourceState::Invalid {
                reason: format!("source does not exist: {}", self.source.display()),
            });
        }

        if self.target_exists() {
            Ok(ResourceState::Present)
        } else {
            Ok(ResourceState::Missing)
        }
    }
}
