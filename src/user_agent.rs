//! Shared User-Agent string for page downloads and REST calls.

/// Project URL for User-Agent identification (good citizenship; RFC 9308).
const PROJECT_UA_URL: &str = "https://github.com/fierce/toolbelt";

/// Default User-Agent for every outbound request (identifies the tool).
#[must_use]
pub(crate) fn default_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("toolbelt/{version} (+{PROJECT_UA_URL})")
}
