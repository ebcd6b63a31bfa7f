//! Page downloader: fetch a list of URLs and save each as a local `.html` file.
//!
//! # Features
//!
//! - File names derived from the last URL path segment (`report.csv` → `report.html`)
//! - Strictly sequential requests with a random 3–8s pause in between
//! - Fail-fast: the first error aborts the rest of the batch
//! - Structured error types with full context
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let urls = ["https://example.com/report.csv", "https://example.com/readme"];
//! let saved = toolbelt::download::download_html_files(&urls, Path::new("out")).await?;
//! for path in saved {
//!     println!("Saved: {}", path.display());
//! }
//! # Ok(())
//! # }
//! ```

mod batch;
mod client;
pub mod constants;
mod error;
mod filename;
mod pacing;

pub use batch::{PageDownloader, download_html_files};
pub use client::HttpClient;
pub(crate) use client::build_client;
pub use error::DownloadError;
pub use filename::{page_file_name, page_path};
pub use pacing::Pacing;
