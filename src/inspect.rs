//! Member-name listing for structured values.
//!
//! Works on [`serde_json::Value`]; anything `Serialize` can be converted with
//! [`serde_json::to_value`] first. Non-object values have no members.

use serde_json::Value;

/// All member names of an object, sorted. Empty for non-objects.
#[must_use]
pub fn keys(value: &Value) -> Vec<String> {
    let mut names: Vec<String> = value
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default();
    names.sort();
    names
}

/// Member names that do not start with an underscore.
#[must_use]
pub fn public_keys(value: &Value) -> Vec<String> {
    keys(value)
        .into_iter()
        .filter(|name| !name.starts_with('_'))
        .collect()
}

/// Member names containing `term`.
#[must_use]
pub fn find_keys(value: &Value, term: &str) -> Vec<String> {
    keys(value)
        .into_iter()
        .filter(|name| name.contains(term))
        .collect()
}
