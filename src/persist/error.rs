//! Error types for the persistence module.

use std::path::PathBuf;

use thiserror::Error;

/// Codec-level failure, one variant per serializer.
#[derive(Debug, Error)]
pub enum CodecError {
    /// JSON encode or decode failure.
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// MessagePack encode failure.
    #[error(transparent)]
    Encode(#[from] rmp_serde::encode::Error),

    /// MessagePack decode failure.
    #[error(transparent)]
    Decode(#[from] rmp_serde::decode::Error),
}

/// Errors that can occur while creating, saving or loading object dumps.
#[derive(Debug, Error)]
pub enum PersistError {
    /// The file suffix does not map to a known format.
    #[error("unsupported format for {path}: expected a .json or .dat suffix")]
    UnsupportedFormat {
        /// The offending path.
        path: PathBuf,
    },

    /// Exclusive create found an existing file.
    #[error("refusing to overwrite existing file {path}")]
    AlreadyExists {
        /// The existing file.
        path: PathBuf,
    },

    /// The file to load does not exist.
    #[error("no such file {path}")]
    NotFound {
        /// The missing file.
        path: PathBuf,
    },

    /// File system error while opening, writing or flushing.
    #[error("IO error on {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The value cannot be represented in the selected format.
    #[error("failed to serialize into {path}: {source}")]
    Serialize {
        /// Destination file.
        path: PathBuf,
        /// The codec error.
        #[source]
        source: CodecError,
    },

    /// The file content is corrupt or does not match the requested type.
    #[error("failed to deserialize {path}: {source}")]
    Deserialize {
        /// Source file.
        path: PathBuf,
        /// The codec error.
        #[source]
        source: CodecError,
    },
}

impl PersistError {
    /// Creates an unsupported-format error.
    pub fn unsupported_format(path: impl Into<PathBuf>) -> Self {
        Self::UnsupportedFormat { path: path.into() }
    }

    /// Maps an IO error, promoting `NotFound` and `AlreadyExists` to their own variants.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            std::io::ErrorKind::NotFound => Self::NotFound { path },
            std::io::ErrorKind::AlreadyExists => Self::AlreadyExists { path },
            _ => Self::Io { path, source },
        }
    }

    /// Creates a serialization error.
    pub fn serialize(path: impl Into<PathBuf>, source: impl Into<CodecError>) -> Self {
        Self::Serialize {
            path: path.into(),
            source: source.into(),
        }
    }

    /// Creates a deserialization error.
    pub fn deserialize(path: impl Into<PathBuf>, source: impl Into<CodecError>) -> Self {
        Self::Deserialize {
            path: path.into(),
            source: source.into(),
        }
    }
}
