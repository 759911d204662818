// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Login Items via the System Events scripting bridge

use std::path::PathBuf;

use ft_exec::Invocation;

use crate::subprocess::{check, command_timeout, run_checked, OPEN, OSASCRIPT};
use crate::{AdapterError, CommandRunner};

const LIST_SCRIPT: &str = r#"tell application "System Events"
    get the name of every login item
end tell"#;

/// A registered Login Item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginItem {
    pub name: String,
    pub path: Option<PathBuf>,
}

/// Names of the user's Login Items.
pub async fn list_login_items<R: CommandRunner>(runner: &R) -> Result<Vec<LoginItem>, AdapterError> {
    let invocation = Invocation::new(OSASCRIPT)
        .args(["-e", LIST_SCRIPT])
        .timeout(command_timeout());
    let receipt = run_checked(runner, invocation, "osascript").await?;
    let items = parse_login_items(&receipt.stdout);
    if items.is_empty() {
        tracing::info!("no login items found");
    }
    for item in &items {
        tracing::info!(name = %item.name, "found login item");
    }
    Ok(items)
}

/// Parse AppleScript list output (`"A, B, C"`).
pub fn parse_login_items(output: &str) -> Vec<LoginItem> {
    output
        .trim()
        .split(", ")
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(|name| LoginItem {
            name: name.to_string(),
            path: None,
        })
        .collect()
}

/// Launch a Login Item in the background, by application name first and
/// then from `/Applications`.
pub async fn launch_login_item<R: CommandRunner>(
    runner: &R,
    item: &LoginItem,
) -> Result<(), AdapterError> {
    let by_name = Invocation::new(OPEN)
        .args(["-g", "-a", item.name.as_str()])
        .timeout(command_timeout());
    match check(runner.run(by_name).await, "open -a") {
        Ok(_) => return Ok(()),
        Err(e) => tracing::debug!(name = %item.name, error = %e, "open by name failed"),
    }

    let bundle = item
        .path
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("/Applications/{}.app", item.name)));
    let by_path = Invocation::new(OPEN)
        .arg("-g")
        .arg(bundle.to_string_lossy())
        .timeout(command_timeout());
    run_checked(runner, by_path, "open").await?;
    Ok(())
}

#[cfg(test)]
#[path = "login_items_tests.rs"]
mod tests;
