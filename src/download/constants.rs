//! Constants for the download module (timeouts, pacing, naming).

use std::time::Duration;

/// Default HTTP connect timeout (30 seconds).
pub const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default HTTP read timeout (5 minutes).
pub const READ_TIMEOUT_SECS: u64 = 300;

/// Shortest pause between two downloads.
pub const MIN_DELAY: Duration = Duration::from_secs(3);

/// Upper bound (exclusive) of the pause between two downloads.
pub const MAX_DELAY: Duration = Duration::from_secs(8);

/// Extension given to every saved page.
pub const HTML_EXTENSION: &str = ".html";

/// Stem used when a URL has no last path segment.
pub const INDEX_STEM: &str = "index";
