//! File-system resource helpers.
use anyhow::{Context as _, Result};
use filetime::{FileTime, set_file_times};
use std::path::Path;

/// Ensure the parent directory of `path` exists, creating it (and any
/// ancestors) if necessary.
///
/// # Errors
///
/// Returns an error if the directory cannot be created.
pub fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create parent: {}", parent.display()))?;
    }
    Ok(())
}

/// Remove whatever exists at `path`: a file, a symlink (broken or not), or
/// a whole directory tree. Does nothing if `path` does not exist.
///
/// Symlinks are removed, never followed.
///
/// # Errors
///
/// Returns an error if the path exists but cannot be removed.
pub fn remove_existing(path: &Path) -> Result<()> {
    let Ok(meta) = path.symlink_metadata() else {
        return Ok(());
    };
    if meta.is_dir() {
        std::fs::remove_dir_all(path)
            .with_context(|| format!("remove existing directory: {}", path.display()))?;
    } else {
        std::fs::remove_file(path)
            .with_context(|| format!("remove existing: {}", path.display()))?;
    }
    Ok(())
}

/// Copy a regular file, then carry over its permission bits and access and
/// modification times.
///
/// # Errors
///
/// Returns an error if the copy fails or the metadata cannot be applied.
pub fn copy_file_with_metadata(src: &Path, dst: &Path) -> Result<()> {
    std::fs::copy(src, dst)
        .with_context(|| format!("copying {} to {}", src.display(), dst.display()))?;
    copy_metadata(src, dst)
}

/// Apply the permissions and timestamps of `src` to `dst`.
fn copy_metadata(src: &Path, dst: &Path) -> Result<()> {
    let meta =
        std::fs::metadata(src).with_context(|| format!("reading metadata of {}", src.display()))?;
    std::fs::set_permissions(dst, meta.permissions())
        .with_context(|| format!("setting permissions on {}", dst.display()))?;
    set_file_times(
        dst,
        FileTime::from_last_access_time(&meta),
        FileTime::from_last_modification_time(&meta),
    )
    .with_context(|| format!("setting times on {}", dst.display()))?;
    Ok(())
}

/// Recursively copy a directory tree, preserving file and directory
/// metadata.
///
/// Symlinks within the source tree are *followed*: directory symlinks are
/// recursed into and file symlinks are copied as regular files.
///
/// Directory metadata is applied after the directory's contents, so that a
/// read-only source directory still ends up fully populated.
///
/// # Errors
///
/// Returns an error if the destination directory cannot be created, a source
/// entry cannot be read, or a file cannot be copied.
pub fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<()> {
    std::fs::create_dir_all(dst)
        .with_context(|| format!("creating directory {}", dst.display()))?;
    for entry in
        std::fs::read_dir(src).with_context(|| format!("reading directory {}", src.display()))?
    {
        let entry = entry.with_context(|| format!("reading entry in {}", src.display()))?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            copy_file_with_metadata(&src_path, &dst_path)?;
        }
    }
    copy_metadata(src, dst)
}
