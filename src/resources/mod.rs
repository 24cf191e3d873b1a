//! Idempotent resource primitives (check + apply pattern).
pub mod copy;
pub mod fs;

use anyhow::Result;

/// Minimal interface for resources that can be described and applied.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, invalid paths, or other system errors.
    fn apply(&self) -> Result<ResourceChange>;
}

/// State of a resource on disk.
///
/// # Examples
///
/// ```
/// use dotfiles_copy::resources::ResourceState;
///
/// let missing = ResourceState::Missing;
/// let present = ResourceState::Present;
/// let invalid = ResourceState::Invalid { reason: "source does not exist".into() };
///
/// assert_ne!(missing, present);
/// assert_ne!(present, invalid);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Nothing exists at the target.
    Missing,
    /// Something already exists at the target.
    Present,
    /// Resource cannot be applied (e.g., the source is missing).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or replaced.
    Applied,
    /// Resource was left alone.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// Unified interface for resources that can be checked and applied.
///
/// # Examples
///
/// ```ignore
/// let state = resource.current_state()?;
/// if resource.needs_change()? {
///     resource.apply()?;
/// }
/// ```
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource state cannot be determined due to I/O
    /// failures, permission issues, or other system errors.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the resource needs to be created.
    ///
    /// # Errors
    ///
    /// Propagates errors from `current_state()`.
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(self.current_state()?, ResourceState::Missing))
    }
}
