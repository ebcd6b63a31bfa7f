//! Error types for directory scanning.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while walking or reading directory trees.
#[derive(Debug, Error)]
pub enum ScanError {
    /// File system error on a specific path.
    #[error("IO error on {path}: {source}")]
    Io {
        /// The path being read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Following a symbolic link would revisit one of its ancestors.
    #[error("symlink loop at {path} (points back to {ancestor})")]
    SymlinkLoop {
        /// The link that closes the loop.
        path: PathBuf,
        /// The ancestor directory it resolves to.
        ancestor: PathBuf,
    },
}

impl ScanError {
    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Converts a walkdir error, keeping loop information when present.
    pub(crate) fn from_walk(root: &std::path::Path, err: walkdir::Error) -> Self {
        let path = err
            .path()
            .map_or_else(|| root.to_path_buf(), std::path::Path::to_path_buf);

        if let Some(ancestor) = err.loop_ancestor() {
            return Self::SymlinkLoop {
                path,
                ancestor: ancestor.to_path_buf(),
            };
        }

        let source = err
            .into_io_error()
            .unwrap_or_else(|| std::io::Error::other("directory walk failed"));
        Self::Io { path, source }
    }
}
