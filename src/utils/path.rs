//! Filesystem path resolution.

use std::path::{Path, PathBuf};

/// Normalize a file system path to absolute form.
///
/// Tries `canonicalize()` first (resolves symlinks, `.`, `..`).
/// Falls back to:
/// - Return as-is if already absolute
/// - Join with current directory if relative
///
/// The fallback matters for the output directory, which usually does not
/// exist before the first build.
#[inline]
pub fn normalize_path(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir().map_or_else(|_| path.to_path_buf(), |cwd| cwd.join(path))
        }
    })
}

/// Expand a leading `~` and resolve the result against `root`.
///
/// Absolute paths (after expansion) are kept as they are.
pub fn resolve_against(path: &Path, root: &Path) -> PathBuf {
    let expanded = match path.to_str() {
        Some(s) => PathBuf::from(shellexpand::tilde(s).into_owned()),
        None => path.to_path_buf(),
    };
    let full = if expanded.is_relative() {
        root.join(expanded)
    } else {
        expanded
    };
    normalize_path(&full)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_relative() {
        let normalized = normalize_path(Path::new("relative/path/icon.svg"));
        assert!(normalized.is_absolute());
        assert!(normalized.ends_with("relative/path/icon.svg"));
    }

    #[test]
    fn test_resolve_against_root() {
        let root = tempfile::tempdir().unwrap();
        let resolved = resolve_against(Path::new("icons"), root.path());
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("icons"));
    }

    #[test]
    fn test_resolve_against_keeps_absolute() {
        let root = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let resolved = resolve_against(other.path(), root.path());
        assert_eq!(resolved, normalize_path(other.path()));
    }
}
