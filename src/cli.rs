//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use toolbelt::scan::DEFAULT_MARKER;

/// Maximum accepted delay flag value in milliseconds.
pub const MAX_DELAY_FLAG_MS: u64 = 600_000;

/// Small file, network and database utilities.
#[derive(Parser, Debug)]
#[command(name = "toolbelt")]
#[command(author, version, about)]
pub struct Cli {
    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Download pages and save each as `<name>.html`
    Download(DownloadArgs),
    /// List files under a directory whose names end with a suffix
    Find(FindArgs),
    /// Create an empty marker file in every directory that lacks one
    Scaffold(ScaffoldArgs),
    /// GET a JSON resource from `<BASE>/<TEMPLATE>` and print it
    Rest(RestArgs),
    /// Create an empty `.json` or `.dat` store
    NewStore(StoreArgs),
    /// Print the contents of a `.json` or `.dat` store as JSON
    Show(StoreArgs),
    /// Run one SQL statement inside a transaction
    Sql(SqlArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// URLs to fetch, in order
    #[arg(required = true, value_name = "URL")]
    pub urls: Vec<String>,

    /// Folder the pages are written to (created if missing)
    #[arg(short, long, value_name = "DIR")]
    pub out: PathBuf,

    /// Lower bound of the pause between downloads in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_DELAY_FLAG_MS))]
    pub min_delay_ms: Option<u64>,

    /// Upper bound of the pause between downloads in milliseconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(0..=MAX_DELAY_FLAG_MS))]
    pub max_delay_ms: Option<u64>,

    /// Do not pause between downloads
    #[arg(long, conflicts_with_all = ["min_delay_ms", "max_delay_ms"])]
    pub no_delay: bool,
}

#[derive(Args, Debug, Clone)]
pub struct FindArgs {
    /// Directory to search recursively
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Name suffix to match, e.g. `py` or `.tar.gz`
    #[arg(value_name = "SUFFIX")]
    pub suffix: String,

    /// Descend into symlinked directories
    #[arg(long)]
    pub follow_links: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ScaffoldArgs {
    /// Root of the directory tree
    #[arg(value_name = "ROOT")]
    pub root: PathBuf,

    /// Marker file name
    #[arg(long, default_value = DEFAULT_MARKER)]
    pub marker: String,
}

#[derive(Args, Debug, Clone)]
pub struct RestArgs {
    /// Base address, e.g. `https://api.example.com`
    #[arg(value_name = "BASE")]
    pub base: String,

    /// Path template with `{}` / `{N}` placeholders
    #[arg(value_name = "TEMPLATE")]
    pub template: String,

    /// Placeholder values
    #[arg(value_name = "ARG")]
    pub args: Vec<String>,
}

#[derive(Args, Debug, Clone)]
pub struct StoreArgs {
    /// Store file (`.json` or `.dat`)
    #[arg(value_name = "FILE")]
    pub file: PathBuf,
}

#[derive(Args, Debug, Clone)]
pub struct SqlArgs {
    /// Statement to execute
    #[arg(value_name = "STATEMENT")]
    pub statement: String,

    /// Credentials file (defaults to `config/creds.ini`)
    #[arg(long, value_name = "PATH")]
    pub creds: Option<PathBuf>,
}
