// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Running application bundles: discovery and relaunch

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use ft_exec::Invocation;

use crate::subprocess::{command_timeout, run_checked, OPEN, PS, PS_TIMEOUT};
use crate::{AdapterError, CommandRunner};

/// Bundles of every running application, excluding our own process.
pub async fn list_applications<R: CommandRunner>(runner: &R) -> Result<Vec<PathBuf>, AdapterError> {
    let invocation = Invocation::new(PS)
        .args(["-axo", "pid=,comm="])
        .timeout(PS_TIMEOUT);
    let receipt = run_checked(runner, invocation, "ps").await?;

    let bundles: Vec<PathBuf> = bundle_candidates(&receipt.stdout, std::process::id())
        .into_iter()
        .filter(|bundle| is_bundle(bundle))
        .collect();
    for bundle in &bundles {
        tracing::info!(bundle = %bundle.display(), "found running application");
    }
    Ok(bundles)
}

/// Reopen a bundle in the background without activating or showing it.
pub async fn reopen_application<R: CommandRunner>(
    runner: &R,
    bundle: &Path,
) -> Result<(), AdapterError> {
    let invocation = Invocation::new(OPEN)
        .args(["-g", "-j"])
        .arg(bundle.to_string_lossy())
        .timeout(command_timeout());
    run_checked(runner, invocation, "open").await?;
    Ok(())
}

/// Parse `ps -axo pid=,comm=` output into de-duplicated `.app` bundle
/// paths, skipping pid 0 and `self_pid`.
pub fn bundle_candidates(ps_output: &str, self_pid: u32) -> BTreeSet<PathBuf> {
    ps_output
        .lines()
        .filter_map(|line| {
            let (pid, exe) = line.trim().split_once(char::is_whitespace)?;
            let pid = pid.parse::<u32>().ok()?;
            if pid == 0 || pid == self_pid {
                return None;
            }
            bundle_root(Path::new(exe.trim()))
        })
        .collect()
}

/// Truncate an executable path to its outermost `*.app` component.
pub fn bundle_root(exe: &Path) -> Option<PathBuf> {
    let mut root = PathBuf::new();
    for component in exe.components() {
        root.push(component);
        if component.as_os_str().to_string_lossy().ends_with(".app") {
            return Some(root);
        }
    }
    None
}

fn is_bundle(path: &Path) -> bool {
    path.join("Contents").join("Info.plist").is_file()
}

#[cfg(test)]
#[path = "apps_tests.rs"]
mod tests;
