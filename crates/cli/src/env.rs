// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the CLI crate.

use std::path::PathBuf;
use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

fn non_empty_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Where the Dock layout is exported before jobs are stopped
pub fn dock_backup() -> Option<PathBuf> {
    non_empty_path("FIXTIM_DOCK_BACKUP")
}

pub fn launch_agents_dir() -> Option<PathBuf> {
    non_empty_path("FIXTIM_LAUNCH_AGENTS_DIR")
}

/// Base settle unit; the job-stop pause is five units.
pub fn settle_ms() -> Option<Duration> {
    parse_duration_ms("FIXTIM_SETTLE_MS")
}

pub fn log_file() -> Option<PathBuf> {
    non_empty_path("FIXTIM_LOG_FILE")
}

pub fn exec_workers() -> Option<usize> {
    std::env::var("FIXTIM_EXEC_WORKERS")
        .ok()
        .and_then(|s| s.parse::<usize>().ok())
        .filter(|n| *n > 0)
}
