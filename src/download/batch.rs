//! Sequential page downloads with courtesy pauses.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use super::client::HttpClient;
use super::error::DownloadError;
use super::filename::page_path;
use super::pacing::Pacing;

/// Downloads a list of pages into a folder, one at a time.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use toolbelt::download::{HttpClient, Pacing, PageDownloader};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let downloader = PageDownloader::new(HttpClient::new()?, Pacing::default());
/// let saved = downloader
///     .download_all(&["https://example.com/report.csv"], Path::new("out"))
///     .await?;
/// assert_eq!(saved[0], Path::new("out/report.html"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct PageDownloader {
    client: HttpClient,
    pacing: Pacing,
}

impl PageDownloader {
    /// Creates a downloader from a client and a pacing policy.
    #[must_use]
    pub fn new(client: HttpClient, pacing: Pacing) -> Self {
        Self { client, pacing }
    }

    /// The pacing policy in use.
    #[must_use]
    pub fn pacing(&self) -> Pacing {
        self.pacing
    }

    /// Fetches a single page and writes it to its derived path under `target_dir`.
    ///
    /// An existing file at that path is overwritten.
    ///
    /// # Errors
    ///
    /// Returns [`DownloadError`] for an invalid URL, a transport failure,
    /// a non-success status or a write failure.
    #[instrument(skip(self, target_dir), fields(url = %url))]
    pub async fn download_one(&self, url: &str, target_dir: &Path) -> Result<PathBuf, DownloadError> {
        let path = page_path(target_dir, url)?;
        let body = self.client.fetch_text(url).await?;

        tokio::fs::write(&path, body.as_bytes())
            .await
            .map_err(|e| DownloadError::io(&path, e))?;

        info!(path = %path.display(), bytes = body.len(), "saved page");
        Ok(path)
    }

    /// Downloads every URL in order, pausing between consecutive requests.
    ///
    /// `target_dir` is created if missing. Returns the written paths in input order.
    ///
    /// # Errors
    ///
    /// The first failure aborts the batch and is returned; pages already
    /// written stay on disk.
    #[instrument(skip(self, urls, target_dir), fields(count = urls.len(), dir = %target_dir.display()))]
    pub async fn download_all<S>(
        &self,
        urls: &[S],
        target_dir: &Path,
    ) -> Result<Vec<PathBuf>, DownloadError>
    where
        S: AsRef<str>,
    {
        tokio::fs::create_dir_all(target_dir)
            .await
            .map_err(|e| DownloadError::io(target_dir, e))?;

        let mut saved = Vec::with_capacity(urls.len());
        for (index, url) in urls.iter().enumerate() {
            let url = url.as_ref();
            if index > 0 {
                self.pacing.pause(url).await;
            }
            saved.push(self.download_one(url, target_dir).await?);
        }

        info!(saved = saved.len(), "batch complete");
        Ok(saved)
    }
}

/// Downloads `urls` into `target_dir` with the default client and pacing.
///
/// # Errors
///
/// See [`PageDownloader::download_all`].
pub async fn download_html_files<S>(
    urls: &[S],
    target_dir: &Path,
) -> Result<Vec<PathBuf>, DownloadError>
where
    S: AsRef<str>,
{
    PageDownloader::new(HttpClient::new()?, Pacing::default())
        .download_all(urls, target_dir)
        .await
}
