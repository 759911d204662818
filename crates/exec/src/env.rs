// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment merging for spawned children.
//!
//! The child sees the parent's environment with the invocation's
//! overrides layered on top. Malformed inherited entries are skipped.

use std::collections::BTreeMap;

/// Split a raw `KEY=VALUE` entry at the first `=`.
///
/// Returns `None` for entries without a separator or with an empty key.
/// The value may itself contain `=` (including a trailing one).
pub fn parse_entry(entry: &str) -> Option<(&str, &str)> {
    let (key, value) = entry.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key, value))
}

/// Merge raw `KEY=VALUE` entries with overrides.
pub fn merge_entries<S: AsRef<str>>(
    entries: impl IntoIterator<Item = S>,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String> {
    let mut merged = BTreeMap::new();
    for entry in entries {
        match parse_entry(entry.as_ref()) {
            Some((k, v)) => {
                merged.insert(k.to_string(), v.to_string());
            }
            None => tracing::trace!(entry = entry.as_ref(), "skipping malformed env entry"),
        }
    }
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// Merge inherited key/value pairs with overrides.
///
/// Override keys replace or add entries; every other inherited key passes
/// through unchanged. Inherited pairs with an empty key or a key containing
/// `=` cannot be represented in a child environment and are skipped.
pub fn merge_env<K, V>(
    inherited: impl IntoIterator<Item = (K, V)>,
    overrides: &BTreeMap<String, String>,
) -> BTreeMap<String, String>
where
    K: Into<String>,
    V: Into<String>,
{
    let mut merged = BTreeMap::new();
    for (k, v) in inherited {
        let key = k.into();
        if key.is_empty() || key.contains('=') {
            continue;
        }
        merged.insert(key, v.into());
    }
    merged.extend(overrides.iter().map(|(k, v)| (k.clone(), v.clone())));
    merged
}

/// The current process environment; non-UTF-8 entries are skipped.
pub fn inherited() -> Vec<(String, String)> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

/// The environment a child of this process should receive.
pub fn merged_env(overrides: &BTreeMap<String, String>) -> BTreeMap<String, String> {
    merge_env(inherited(), overrides)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
