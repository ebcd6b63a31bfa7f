//! Toolbelt Library
//!
//! Small, independent helpers for everyday scripting tasks:
//!
//! - [`persist`] - create, save and load objects as JSON (`.json`) or MessagePack (`.dat`)
//! - [`scan`] - recursive suffix search, HTML listing and package marker scaffolding
//! - [`download`] - sequential page downloads with randomized pauses
//! - [`rest`] - JSON-over-GET calls with positional path templates
//! - [`db`] - MySQL credentials and a commit-or-rollback transaction scope
//! - [`inspect`] - member-name listing for structured values
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! # fn example() -> Result<(), toolbelt::PersistError> {
//! toolbelt::persist::save(&vec![1, 2, 3], Path::new("numbers.dat"))?;
//! let numbers: Vec<u32> = toolbelt::persist::load(Path::new("numbers.dat"))?;
//! assert_eq!(numbers, [1, 2, 3]);
//! # Ok(())
//! # }
//! ```

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod db;
pub mod download;
pub mod inspect;
pub mod persist;
pub mod rest;
pub mod scan;
mod user_agent;

// Re-export commonly used types
pub use db::{Credentials, Database, DbError};
pub use download::{DownloadError, HttpClient, Pacing, PageDownloader, download_html_files};
pub use persist::{Format, PersistError};
pub use rest::{RestClient, RestError, rest_call};
pub use scan::{ScanError, find_by_extension, mark_packages};
