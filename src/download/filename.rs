//! Local file naming for downloaded pages.
//!
//! A page is saved under the last path segment of its URL with any trailing
//! extension replaced by `.html`: `https://host/report.csv` becomes
//! `report.html`, `https://host/readme` becomes `readme.html`.

use std::path::{Component, Path, PathBuf};

use url::Url;

use super::constants::{HTML_EXTENSION, INDEX_STEM};
use super::error::DownloadError;

/// Derives the `.html` file name for a page URL.
///
/// The last path segment is percent-decoded, stripped of one trailing
/// extension and sanitized. A URL ending in `/` is named `index.html`.
///
/// # Errors
///
/// Returns [`DownloadError::InvalidUrl`] if `url` is not an absolute HTTP(S) URL.
pub fn page_file_name(url: &str) -> Result<String, DownloadError> {
    let parsed = Url::parse(url).map_err(|_| DownloadError::invalid_url(url))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(DownloadError::invalid_url(url));
    }

    let last = parsed
        .path_segments()
        .and_then(|mut segments| segments.next_back())
        .unwrap_or("");
    let decoded = urlencoding::decode(last).map_or_else(|_| last.to_string(), |d| d.into_owned());

    let stem = sanitize_filename(strip_extension(&decoded));
    let stem = if stem.trim_matches('_').is_empty() {
        INDEX_STEM
    } else {
        stem.as_str()
    };

    Ok(format!("{stem}{HTML_EXTENSION}"))
}

/// Joins the derived page file name onto `dir`.
///
/// # Errors
///
/// Same as [`page_file_name`].
pub fn page_path(dir: &Path, url: &str) -> Result<PathBuf, DownloadError> {
    Ok(dir.join(page_file_name(url)?))
}

/// Removes one trailing `.ext` where `ext` is made of word characters.
///
/// Leading dots (hidden-file names) are not treated as extensions.
pub(crate) fn strip_extension(name: &str) -> &str {
    match name.rfind('.') {
        Some(pos)
            if pos > 0
                && pos + 1 < name.len()
                && name[pos + 1..]
                    .chars()
                    .all(|c| c.is_alphanumeric() || c == '_') =>
        {
            &name[..pos]
        }
        _ => name,
    }
}

/// Sanitizes a filename for filesystem safety.
///
/// Replaces characters that are invalid on common filesystems:
/// / \ : * ? " < > |
pub(crate) fn sanitize_filename(name: &str) -> String {
    let sanitized: String = name
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if sanitized.is_empty() || is_safe_filename_segment(&sanitized) {
        sanitized
    } else {
        sanitized
            .chars()
            .map(|c| if c == '.' { '_' } else { c })
            .collect()
    }
}

fn is_safe_filename_segment(name: &str) -> bool {
    !Path::new(name).components().any(|component| {
        matches!(
            component,
            Component::CurDir | Component::ParentDir | Component::RootDir | Component::Prefix(_)
        )
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_page_file_name_replaces_extension() {
        assert_eq!(
            page_file_name("http://host/report.csv").unwrap(),
            "report.html"
        );
    }

    #[test]
    fn test_page_file_name_appends_extension_when_missing() {
        assert_eq!(page_file_name("http://host/readme").unwrap(), "readme.html");
    }

    #[test]
    fn test_page_file_name_host_dots_do_not_affect_name() {
        assert_eq!(
            page_file_name("https://www.example.com/docs/guide").unwrap(),
            "guide.html"
        );
    }

    #[test]
    fn test_page_file_name_strips_only_last_extension() {
        assert_eq!(
            page_file_name("https://example.com/archive.tar.gz").unwrap(),
            "archive.tar.html"
        );
    }

    #[test]
    fn test_page_file_name_ignores_query_and_fragment() {
        assert_eq!(
            page_file_name("https://example.com/page.php?id=3#top").unwrap(),
            "page.html"
        );
    }

    #[test]
    fn test_page_file_name_trailing_slash_uses_index() {
        assert_eq!(page_file_name("https://example.com/").unwrap(), "index.html");
        assert_eq!(page_file_name("https://example.com").unwrap(), "index.html");
    }

    #[test]
    fn test_page_file_name_decodes_percent_escapes() {
        assert_eq!(
            page_file_name("https://example.com/annual%20report.pdf").unwrap(),
            "annual report.html"
        );
    }

    #[test]
    fn test_page_file_name_sanitizes_decoded_separators() {
        let name = page_file_name("https://example.com/a%2Fb%3Ac").unwrap();
        assert_eq!(name, "a_b_c.html");
    }

    #[test]
    fn test_page_file_name_rejects_invalid_urls() {
        assert!(matches!(
            page_file_name("not a url"),
            Err(DownloadError::InvalidUrl { .. })
        ));
        assert!(matches!(
            page_file_name("ftp://example.com/file.txt"),
            Err(DownloadError::InvalidUrl { .. })
        ));
    }

    #[test]
    fn test_page_path_joins_directory() {
        let path = page_path(Path::new("out"), "http://host/report.csv").unwrap();
        assert_eq!(path, Path::new("out").join("report.html"));
    }

    #[test]
    fn test_strip_extension_keeps_hidden_names() {
        assert_eq!(strip_extension(".profile"), ".profile");
        assert_eq!(strip_extension("name."), "name.");
        assert_eq!(strip_extension("v1.2"), "v1");
    }

    #[test]
    fn test_sanitize_filename_removes_invalid_chars() {
        assert_eq!(sanitize_filename("file/name"), "file_name");
        assert_eq!(sanitize_filename("file\\name"), "file_name");
        assert_eq!(sanitize_filename("file<name>"), "file_name_");
        assert_eq!(sanitize_filename("file|name"), "file_name");
    }

    #[test]
    fn test_sanitize_filename_rewrites_dot_segments() {
        assert_eq!(sanitize_filename("."), "_");
        assert_eq!(sanitize_filename(".."), "__");
    }

    #[test]
    fn test_dot_segment_url_falls_back_to_index() {
        // `..` is normalized away by the URL parser
        assert_eq!(
            page_file_name("https://example.com/a/..").unwrap(),
            "index.html"
        );
    }
}
