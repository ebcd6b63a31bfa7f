//! CLI command handlers.

mod download;
mod rest;
mod scan;
mod sql;
mod store;

pub use download::run_download_command;
pub use rest::run_rest_command;
pub use scan::{run_find_command, run_scaffold_command};
pub use sql::run_sql_command;
pub use store::{run_new_store_command, run_show_command};
