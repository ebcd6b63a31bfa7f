//! CLI entry point for the toolbelt tool.

use anyhow::Result;
use clap::Parser;
use tracing::debug;

mod app_config;
mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let cli = Cli::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?cli, "CLI arguments parsed");

    let loaded = app_config::load_default_config()?;
    debug!(
        path = ?loaded.path,
        from_file = loaded.loaded_from_file,
        "configuration loaded"
    );
    let config = loaded.config;

    match &cli.command {
        Command::Download(args) => commands::run_download_command(args, &config).await,
        Command::Find(args) => commands::run_find_command(args),
        Command::Scaffold(args) => commands::run_scaffold_command(args),
        Command::Rest(args) => commands::run_rest_command(args, &config).await,
        Command::NewStore(args) => commands::run_new_store_command(args),
        Command::Show(args) => commands::run_show_command(args),
        Command::Sql(args) => commands::run_sql_command(args, &config).await,
    }
}
