// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! User LaunchAgents: discovery and reload

use std::path::{Path, PathBuf};

use ft_exec::Invocation;

use crate::subprocess::{check, command_timeout, run_checked, ID, LAUNCHCTL};
use crate::{AdapterError, CommandRunner};

/// How a LaunchAgent came back
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reloaded {
    /// `launchctl bootstrap` succeeded
    Bootstrapped,
    /// bootstrap failed; legacy `launchctl load -w` succeeded
    Loaded,
}

/// Default per-user LaunchAgents directory (`~/Library/LaunchAgents`).
pub fn default_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join("Library").join("LaunchAgents"))
}

/// Every `*.plist` in `dir`, sorted. A missing or unreadable directory
/// yields an empty list.
pub fn list_launch_agents(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "cannot read LaunchAgents directory");
            return Vec::new();
        }
    };
    let mut plists: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "plist"))
        .collect();
    plists.sort();
    for plist in &plists {
        tracing::info!(plist = %plist.display(), "found LaunchAgent");
    }
    plists
}

/// The invoking user's uid, via `id -u`.
pub async fn current_uid<R: CommandRunner>(runner: &R) -> Result<u32, AdapterError> {
    let invocation = Invocation::new(ID).arg("-u").timeout(command_timeout());
    let receipt = run_checked(runner, invocation, "id -u").await?;
    receipt
        .stdout
        .trim()
        .parse()
        .map_err(|_| AdapterError::Parse {
            description: "id -u".to_string(),
            detail: receipt.stdout.trim().to_string(),
        })
}

/// launchd domain target for a user's GUI session.
pub fn gui_domain(uid: u32) -> String {
    format!("gui/{uid}")
}

/// Unload and reload one LaunchAgent.
///
/// `bootout` may fail when the agent is not loaded; that is ignored. If
/// `bootstrap` fails the legacy `load -w` is tried before giving up.
pub async fn reload_launch_agent<R: CommandRunner>(
    runner: &R,
    plist: &Path,
    uid: u32,
) -> Result<Reloaded, AdapterError> {
    let domain = gui_domain(uid);
    let path = plist.to_string_lossy().into_owned();

    let bootout = runner
        .run(
            Invocation::new(LAUNCHCTL)
                .args(["bootout", domain.as_str(), path.as_str()])
                .timeout(command_timeout()),
        )
        .await;
    if let Err(e) = check(bootout, "launchctl bootout") {
        tracing::debug!(plist = %path, error = %e, "bootout failed (may be expected)");
    }

    tokio::time::sleep(crate::env::launchctl_gap()).await;

    let bootstrap = runner
        .run(
            Invocation::new(LAUNCHCTL)
                .args(["bootstrap", domain.as_str(), path.as_str()])
                .timeout(command_timeout()),
        )
        .await;
    match check(bootstrap, "launchctl bootstrap") {
        Ok(_) => return Ok(Reloaded::Bootstrapped),
        Err(e) => tracing::debug!(plist = %path, error = %e, "bootstrap failed, trying legacy load"),
    }

    let load = Invocation::new(LAUNCHCTL)
        .args(["load", "-w", path.as_str()])
        .timeout(command_timeout());
    run_checked(runner, load, "launchctl load").await?;
    Ok(Reloaded::Loaded)
}

#[cfg(test)]
#[path = "launch_agents_tests.rs"]
mod tests;
