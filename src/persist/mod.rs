//! Object dumps to JSON or binary files, dispatched on the file suffix.
//!
//! `.json` files hold UTF-8 JSON; `.dat` files hold MessagePack with named
//! struct fields. Any other suffix is rejected with
//! [`PersistError::UnsupportedFormat`]. The `*_as` variants take an explicit
//! [`Format`] and ignore the suffix.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn example() -> Result<(), toolbelt::PersistError> {
//! let path = Path::new("scores.json");
//! toolbelt::persist::save(&vec![3, 1, 4], path)?;
//! let scores: Vec<u32> = toolbelt::persist::load(path)?;
//! assert_eq!(scores, vec![3, 1, 4]);
//! # Ok(())
//! # }
//! ```

mod error;
mod format;

use std::fs::{File, OpenOptions};
use std::io::{BufReader, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

pub use error::{CodecError, PersistError};
pub use format::Format;

/// Creates a new file holding an empty top-level sequence.
///
/// # Errors
///
/// - [`PersistError::UnsupportedFormat`] for an unknown suffix
/// - [`PersistError::AlreadyExists`] if the file is present; it is left untouched
/// - [`PersistError::Io`] for other file system failures
pub fn create_empty(path: &Path) -> Result<(), PersistError> {
    create_empty_as(path, Format::from_path(path)?)
}

/// Creates a new empty container file in an explicit format.
///
/// # Errors
///
/// Same as [`create_empty`], minus the suffix check.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn create_empty_as(path: &Path, format: Format) -> Result<(), PersistError> {
    let bytes = encode(path, format, &Vec::<serde_json::Value>::new())?;
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| PersistError::io(path, e))?;

    write_bytes(file, path, &bytes)?;
    debug!(%format, "created empty store");
    Ok(())
}

/// Serializes `value` into `path`, replacing any existing content.
///
/// # Errors
///
/// - [`PersistError::UnsupportedFormat`] for an unknown suffix
/// - [`PersistError::Serialize`] if the value is not representable in the format
/// - [`PersistError::Io`] for file system failures
pub fn save<T>(value: &T, path: &Path) -> Result<(), PersistError>
where
    T: Serialize + ?Sized,
{
    save_as(value, path, Format::from_path(path)?)
}

/// Serializes `value` into `path` using an explicit format.
///
/// # Errors
///
/// Same as [`save`], minus the suffix check.
#[instrument(skip(value, path), fields(path = %path.display()))]
pub fn save_as<T>(value: &T, path: &Path, format: Format) -> Result<(), PersistError>
where
    T: Serialize + ?Sized,
{
    // The file is only truncated once encoding has succeeded.
    let bytes = encode(path, format, value)?;
    let file = File::create(path).map_err(|e| PersistError::io(path, e))?;
    write_bytes(file, path, &bytes)?;
    debug!(%format, "saved object");
    Ok(())
}

/// Deserializes the object stored in `path`.
///
/// # Errors
///
/// - [`PersistError::UnsupportedFormat`] for an unknown suffix
/// - [`PersistError::NotFound`] if the file does not exist
/// - [`PersistError::Deserialize`] if the content is corrupt or has the wrong shape
pub fn load<T>(path: &Path) -> Result<T, PersistError>
where
    T: DeserializeOwned,
{
    load_as(path, Format::from_path(path)?)
}

/// Deserializes the object stored in `path` using an explicit format.
///
/// # Errors
///
/// Same as [`load`], minus the suffix check.
#[instrument(skip(path), fields(path = %path.display()))]
pub fn load_as<T>(path: &Path, format: Format) -> Result<T, PersistError>
where
    T: DeserializeOwned,
{
    let file = File::open(path).map_err(|e| PersistError::io(path, e))?;
    let reader = BufReader::new(file);

    let value = match format {
        Format::Json => {
            serde_json::from_reader(reader).map_err(|e| PersistError::deserialize(path, e))?
        }
        Format::Binary => {
            rmp_serde::decode::from_read(reader).map_err(|e| PersistError::deserialize(path, e))?
        }
    };
    debug!(%format, "loaded object");
    Ok(value)
}

fn encode<T>(path: &Path, format: Format, value: &T) -> Result<Vec<u8>, PersistError>
where
    T: Serialize + ?Sized,
{
    match format {
        Format::Json => serde_json::to_vec(value).map_err(|e| PersistError::serialize(path, e)),
        Format::Binary => {
            rmp_serde::to_vec_named(value).map_err(|e| PersistError::serialize(path, e))
        }
    }
}

fn write_bytes(mut file: File, path: &Path, bytes: &[u8]) -> Result<(), PersistError> {
    file.write_all(bytes).map_err(|e| PersistError::io(path, e))
}
