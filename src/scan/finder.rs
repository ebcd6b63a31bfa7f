//! Recursive search for files by name suffix.

use std::path::{Path, PathBuf};

use tracing::trace;
use walkdir::WalkDir;

use super::error::ScanError;

/// Options for [`find_by_extension_with`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FinderOptions {
    /// Descend into symlinked directories. Loops are reported, not followed.
    pub follow_links: bool,
}

/// Lazy iterator over files whose name ends with a suffix.
///
/// Yields paths in traversal order. Unreadable entries and symlink loops
/// are yielded as errors and the walk carries on.
#[derive(Debug)]
pub struct ExtensionFinder {
    root: PathBuf,
    suffix: String,
    walker: walkdir::IntoIter,
}

impl Iterator for ExtensionFinder {
    type Item = Result<PathBuf, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let entry = match self.walker.next()? {
                Ok(entry) => entry,
                Err(e) => return Some(Err(ScanError::from_walk(&self.root, e))),
            };

            if !entry.file_type().is_file() {
                continue;
            }

            if entry
                .file_name()
                .as_encoded_bytes()
                .ends_with(self.suffix.as_bytes())
            {
                return Some(Ok(entry.into_path()));
            }

            trace!(path = %entry.path().display(), "suffix mismatch");
        }
    }
}

/// Finds every regular file under `root` whose name ends with `suffix`.
///
/// The suffix is matched against the raw file name, so `"py"` matches
/// `a.py` and `".py"` does too. Symbolic links are not followed.
///
/// # Example
///
/// ```no_run
/// let sources: Vec<_> = toolbelt::scan::find_by_extension(".", "rs")
///     .filter_map(Result::ok)
///     .collect();
/// ```
pub fn find_by_extension(root: impl AsRef<Path>, suffix: &str) -> ExtensionFinder {
    find_by_extension_with(root, suffix, FinderOptions::default())
}

/// Same as [`find_by_extension`] with explicit options.
pub fn find_by_extension_with(
    root: impl AsRef<Path>,
    suffix: &str,
    options: FinderOptions,
) -> ExtensionFinder {
    let root = root.as_ref().to_path_buf();
    let walker = WalkDir::new(&root)
        .follow_links(options.follow_links)
        .into_iter();

    ExtensionFinder {
        root,
        suffix: suffix.to_string(),
        walker,
    }
}
