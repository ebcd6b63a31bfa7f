//! Directory scanning helpers.
//!
//! - [`find_by_extension`] walks a tree lazily and yields files by name suffix
//! - [`html_documents`] reads saved `.html` pages from one directory
//! - [`mark_packages`] drops an empty marker file into every directory lacking one

mod error;
mod finder;
mod html;
mod scaffold;

pub use error::ScanError;
pub use finder::{ExtensionFinder, FinderOptions, find_by_extension, find_by_extension_with};
pub use html::{HtmlDocument, html_documents};
pub use scaffold::{DEFAULT_MARKER, mark_packages};
