//! REST command handler.

use anyhow::Result;

use toolbelt::rest::{PathArg, RestClient};

use crate::app_config::FileConfig;
use crate::cli::RestArgs;

pub async fn run_rest_command(args: &RestArgs, config: &FileConfig) -> Result<()> {
    let api = RestClient::with_timeouts(
        args.base.as_str(),
        config.connect_timeout_secs(),
        config.read_timeout_secs(),
    )?;

    let values: Vec<PathArg<'_>> = args.args.iter().map(|a| a as PathArg<'_>).collect();
    let body: serde_json::Value = api.get_json(&args.template, &values).await?;

    println!("{}", serde_json::to_string_pretty(&body)?);
    Ok(())
}
