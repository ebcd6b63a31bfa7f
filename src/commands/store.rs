//! Store command handlers: create and show persisted files.

use anyhow::Result;
use tracing::info;

use toolbelt::persist;

use crate::cli::StoreArgs;

pub fn run_new_store_command(args: &StoreArgs) -> Result<()> {
    persist::create_empty(&args.file)?;
    info!(path = %args.file.display(), "created empty store");
    Ok(())
}

pub fn run_show_command(args: &StoreArgs) -> Result<()> {
    let value: serde_json::Value = persist::load(&args.file)?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
