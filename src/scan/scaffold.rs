//! Marker-file scaffolding for directory trees.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

use tracing::{info, instrument};
use walkdir::WalkDir;

use super::error::ScanError;

/// Marker written by [`mark_packages`] when none is given.
pub const DEFAULT_MARKER: &str = "__init__.py";

/// Creates an empty `marker` file in `root` and every directory below it that lacks one.
///
/// Returns the created paths in traversal order. Existing markers are left untouched.
///
/// # Errors
///
/// Stops at the first directory that cannot be listed or written and returns
/// [`ScanError`]; markers created before the failure remain.
#[instrument(skip(root), fields(root = %root.display()))]
pub fn mark_packages(root: &Path, marker: &str) -> Result<Vec<PathBuf>, ScanError> {
    let mut created = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = entry.map_err(|e| ScanError::from_walk(root, e))?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let marker_path = entry.path().join(marker);
        if marker_path.exists() {
            continue;
        }

        OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&marker_path)
            .map_err(|e| ScanError::io(&marker_path, e))?;
        info!(path = %marker_path.display(), "created marker");
        created.push(marker_path);
    }

    Ok(created)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn test_marks_every_directory_including_root() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("a/b")).unwrap();
        fs::create_dir(temp.path().join("c")).unwrap();

        let created = mark_packages(temp.path(), DEFAULT_MARKER).unwrap();

        assert_eq!(created.len(), 4);
        for dir in ["", "a", "a/b", "c"] {
            let marker = temp.path().join(dir).join(DEFAULT_MARKER);
            assert!(marker.is_file(), "{} missing", marker.display());
            assert_eq!(fs::metadata(&marker).unwrap().len(), 0);
        }
    }

    #[test]
    fn test_existing_markers_are_preserved() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("pkg")).unwrap();
        fs::write(temp.path().join("pkg").join(DEFAULT_MARKER), "VERSION = 1\n").unwrap();

        let created = mark_packages(temp.path(), DEFAULT_MARKER).unwrap();

        assert_eq!(created, vec![temp.path().join(DEFAULT_MARKER)]);
        assert_eq!(
            fs::read_to_string(temp.path().join("pkg").join(DEFAULT_MARKER)).unwrap(),
            "VERSION = 1\n"
        );
    }

    #[test]
    fn test_second_run_creates_nothing() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("x")).unwrap();

        mark_packages(temp.path(), "mod.rs").unwrap();
        let again = mark_packages(temp.path(), "mod.rs").unwrap();

        assert!(again.is_empty());
    }

    #[test]
    fn test_missing_root_fails() {
        let temp = TempDir::new().unwrap();
        assert!(mark_packages(&temp.path().join("nope"), DEFAULT_MARKER).is_err());
    }
}
