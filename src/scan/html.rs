//! Listing of saved HTML pages in a single directory.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::error::ScanError;

/// Raw HTML document read from disk, paired with its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlDocument {
    /// File name without the directory.
    pub file_name: String,
    /// Trimmed UTF-8 file content.
    pub body: String,
}

/// Lazily reads every `.html` file directly inside `dir`, in file-name order.
///
/// Subdirectories are not descended into. Files whose name appears in
/// `exclusions` are skipped.
///
/// # Errors
///
/// Returns [`ScanError::Io`] if `dir` does not exist. Per-entry failures are
/// yielded by the iterator.
pub fn html_documents<'a>(
    dir: &Path,
    exclusions: &'a [&'a str],
) -> Result<impl Iterator<Item = Result<HtmlDocument, ScanError>> + use<'a>, ScanError> {
    fs::metadata(dir).map_err(|e| ScanError::io(dir, e))?;
    let root: PathBuf = dir.to_path_buf();
    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    Ok(walker.into_iter().filter_map(move |entry| {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => return Some(Err(ScanError::from_walk(&root, e))),
        };
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if !entry.file_type().is_file() || !file_name.ends_with(".html") {
            return None;
        }
        if exclusions.contains(&file_name.as_str()) {
            debug!(file = %file_name, "excluded");
            return None;
        }

        Some(
            fs::read_to_string(entry.path())
                .map(|body| HtmlDocument {
                    file_name,
                    body: body.trim().to_string(),
                })
                .map_err(|e| ScanError::io(entry.path(), e)),
        )
    }))
}
