//! File suffix to serialization format mapping.

use std::fmt;
use std::path::Path;

use super::error::PersistError;

/// Serialization format of an object dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Human-readable JSON, UTF-8 encoded.
    Json,
    /// MessagePack with named struct fields.
    Binary,
}

impl Format {
    /// Resolves the format implied by `path`'s suffix.
    ///
    /// `.json` selects [`Format::Json`] and `.dat` selects [`Format::Binary`],
    /// compared ASCII case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`PersistError::UnsupportedFormat`] for any other suffix, including none.
    pub fn from_path(path: &Path) -> Result<Self, PersistError> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
            .ok_or_else(|| PersistError::unsupported_format(path))
    }

    /// Maps a bare extension (without the dot) to a format.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        if ext.eq_ignore_ascii_case("json") {
            Some(Self::Json)
        } else if ext.eq_ignore_ascii_case("dat") {
            Some(Self::Binary)
        } else {
            None
        }
    }

    /// Canonical extension for this format, without the dot.
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Binary => "dat",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Binary => f.write_str("binary"),
        }
    }
}
