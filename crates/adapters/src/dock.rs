// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Dock layout backup and restore

use std::path::{Path, PathBuf};

use ft_exec::Invocation;

use crate::subprocess::{command_timeout, run_checked, DEFAULTS, KILLALL};
use crate::{AdapterError, CommandRunner};

const DOCK_DOMAIN: &str = "com.apple.dock.plist";

/// Default backup location: `~/Documents/.com.apple.dock.backup.plist`.
pub fn default_backup_path() -> Option<PathBuf> {
    dirs::document_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join("Documents")))
        .map(|docs| docs.join(".com.apple.dock.backup.plist"))
}

/// Export the Dock preferences to `path`.
pub async fn backup_dock<R: CommandRunner>(runner: &R, path: &Path) -> Result<(), AdapterError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let invocation = Invocation::new(DEFAULTS)
        .args(["export", DOCK_DOMAIN])
        .arg(path.to_string_lossy())
        .timeout(command_timeout());
    run_checked(runner, invocation, "defaults export").await?;
    Ok(())
}

/// Import the Dock preferences from `path` and restart the Dock so it
/// picks them up.
pub async fn restore_dock<R: CommandRunner>(runner: &R, path: &Path) -> Result<(), AdapterError> {
    let import = Invocation::new(DEFAULTS)
        .args(["import", DOCK_DOMAIN])
        .arg(path.to_string_lossy())
        .timeout(command_timeout());
    run_checked(runner, import, "defaults import").await?;

    let restart = Invocation::new(KILLALL)
        .args(["-9", "Dock"])
        .timeout(command_timeout());
    run_checked(runner, restart, "killall Dock").await?;
    Ok(())
}

#[cfg(test)]
#[path = "dock_tests.rs"]
mod tests;
