//! Download command handler.

use anyhow::{Context, Result};
use tracing::debug;

use toolbelt::download::{HttpClient, PageDownloader};

use crate::app_config::FileConfig;
use crate::cli::DownloadArgs;

pub async fn run_download_command(args: &DownloadArgs, config: &FileConfig) -> Result<()> {
    let pacing = config.pacing(args.min_delay_ms, args.max_delay_ms, args.no_delay);
    debug!(?pacing, "download pacing");

    let client = HttpClient::with_timeouts(config.connect_timeout_secs(), config.read_timeout_secs())?;
    let saved = PageDownloader::new(client, pacing)
        .download_all(&args.urls, &args.out)
        .await
        .context("Download batch aborted")?;

    for path in saved {
        println!("{}", path.display());
    }
    Ok(())
}
