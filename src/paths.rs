//! Path resolution utilities.
//!
//! Home directory discovery, `~` expansion, and the non-strict real-path
//! resolution used to keep copy operations inside the user's home.
use std::path::{Component, Path, PathBuf};

use crate::error::PathError;

/// Maximum number of symbolic links followed while resolving one path.
const MAX_LINK_DEPTH: u8 = 40;

/// Determine the user's home directory from the environment.
///
/// Uses `USERPROFILE` (falling back to `HOME`) on Windows and `HOME`
/// everywhere else. Does not check that the directory exists.
///
/// # Errors
///
/// Returns [`PathError::NoHome`] if the relevant variables are unset.
pub fn home_dir() -> Result<PathBuf, PathError> {
    let home = if cfg!(target_os = "windows") {
        std::env::var("USERPROFILE")
            .or_else(|_| std::env::var("HOME"))
            .map_err(|_| {
                PathError::NoHome("neither USERPROFILE nor HOME is set".to_string())
            })?
    } else {
        std::env::var("HOME").map_err(|_| PathError::NoHome("HOME is not set".to_string()))?
    };
    Ok(PathBuf::from(home))
}

/// Expand a leading `~` against `home`, then anchor relative results at
/// `base`.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
/// use dotfiles_copy::paths::expand;
///
/// let home = Path::new("/home/me");
/// let base = Path::new("/home/me/dotfiles");
/// assert_eq!(expand("~/.vimrc", home, base), PathBuf::from("/home/me/.vimrc"));
/// assert_eq!(expand("vimrc", home, base), PathBuf::from("/home/me/dotfiles/vimrc"));
/// assert_eq!(expand("/etc/hosts", home, base), PathBuf::from("/etc/hosts"));
/// ```
#[must_use]
pub fn expand(path: &str, home: &Path, base: &Path) -> PathBuf {
    let home_str = home.to_string_lossy();
    let expanded = shellexpand::tilde_with_context(path, || Some(&*home_str));
    let expanded = PathBuf::from(expanded.into_owned());
    if expanded.is_absolute() {
        expanded
    } else {
        base.join(expanded)
    }
}

/// Resolve symbolic links in `path` without requiring the path to exist.
///
/// Existing paths are canonicalized outright. For paths with a missing
/// tail, every component is walked in order: `.` is dropped, `..` pops
/// the resolved prefix, and each existing symlink is replaced by its
/// (recursively resolved) target. Components that do not exist are kept
/// verbatim.
#[must_use]
pub fn resolve_real_path(path: &Path) -> PathBuf {
    dunce::canonicalize(path).unwrap_or_else(|_| resolve_components(path, 0))
}

fn resolve_components(path: &Path, depth: u8) -> PathBuf {
    let mut resolved = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                resolved.push(name);
                if depth < MAX_LINK_DEPTH
                    && let Ok(target) = std::fs::read_link(&resolved)
                {
                    resolved.pop();
                    let joined = resolved.join(target);
                    resolved = resolve_components(&joined, depth + 1);
                }
            }
        }
    }
    resolved
}

/// Return `true` if the real location of `path` lies inside `root`.
///
/// Both sides are resolved with [`resolve_real_path`], so symlinks that
/// escape `root` are caught.
#[must_use]
pub fn is_within(path: &Path, root: &Path) -> bool {
    resolve_real_path(path).starts_with(resolve_real_path(root))
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn expand_tilde_uses_given_home() {
        let p = expand("~/.config/tool", Path::new("/home/alice"), Path::new("/repo"));
        assert_eq!(p, PathBuf::from("/home/alice/.config/tool"));
    }

    #[test]
    fn expand_bare_tilde_is_home() {
        let p = expand("~", Path::new("/home/alice"), Path::new("/repo"));
        assert_eq!(p, PathBuf::from("/home/alice"));
    }

    #[test]
    fn expand_relative_joins_base() {
        let p = expand("config/tool", Path::new("/home/alice"), Path::new("/repo"));
        assert_eq!(p, PathBuf::from("/repo/config/tool"));
    }

    #[test]
    fn expand_leaves_other_users_tilde_relative_to_base() {
        // Only the current user's `~` is expanded.
        let p = expand("~bob/file", Path::new("/home/alice"), Path::new("/repo"));
        assert_eq!(p, PathBuf::from("/repo/~bob/file"));
    }

    #[test]
    fn resolve_existing_path_canonicalizes() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("file");
        std::fs::write(&file, "x").unwrap();
        let real = resolve_real_path(&dir.path().join(".").join("file"));
        assert_eq!(real, dunce::canonicalize(&file).unwrap());
    }

    #[test]
    fn resolve_missing_tail_keeps_components() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("a").join("b").join("c.txt");
        let real = resolve_real_path(&missing);
        let root = dunce::canonicalize(dir.path()).unwrap();
        assert_eq!(real, root.join("a").join("b").join("c.txt"));
    }

    #[test]
    fn resolve_parent_dir_components() {
        let dir = tempfile::tempdir().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        let path = root.join("missing").join("..").join("other");
        assert_eq!(resolve_real_path(&path), root.join("other"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_follows_symlink_in_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        let outside = root.join("outside");
        std::fs::create_dir(&outside).unwrap();
        let link = root.join("link");
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        let real = resolve_real_path(&link.join("new-file"));
        assert_eq!(real, outside.join("new-file"));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_dangling_symlink_uses_target() {
        let dir = tempfile::tempdir().unwrap();
        let root = dunce::canonicalize(dir.path()).unwrap();
        let link = root.join("dangling");
        std::os::unix::fs::symlink("/nonexistent/target", &link).unwrap();
        assert_eq!(
            resolve_real_path(&link),
            PathBuf::from("/nonexistent/target")
        );
    }

    #[cfg(unix)]
    #[test]
    fn resolve_symlink_loop_terminates() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a");
        let b = dir.path().join("b");
        std::os::unix::fs::symlink(&b, &a).unwrap();
        std::os::unix::fs::symlink(&a, &b).unwrap();
        // Must return rather than recurse forever.
        let _ = resolve_real_path(&a.join("x"));
    }

    #[test]
    fn is_within_accepts_nested_path() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_within(&dir.path().join(".vimrc"), dir.path()));
        assert!(is_within(dir.path(), dir.path()));
    }

    #[test]
    fn is_within_rejects_parent_escape() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        std::fs::create_dir(&home).unwrap();
        assert!(!is_within(&home.join("..").join("elsewhere"), &home));
    }

    #[test]
    fn is_within_rejects_sibling_with_common_prefix() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let sibling = dir.path().join("home-other");
        std::fs::create_dir(&home).unwrap();
        std::fs::create_dir(&sibling).unwrap();
        assert!(!is_within(&sibling, &home));
    }

    #[cfg(unix)]
    #[test]
    fn is_within_rejects_symlink_escape() {
        let dir = tempfile::tempdir().unwrap();
        let home = dir.path().join("home");
        let outside = dir.path().join("outside");
        std::fs::create_dir(&home).unwrap();
        std::fs::create_dir(&outside).unwrap();
        std::os::unix::fs::symlink(&outside, home.join("escape")).unwrap();
        assert!(!is_within(&home.join("escape").join("file"), &home));
    }
}
