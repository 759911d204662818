// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the adapters crate.

use std::time::Duration;

fn parse_duration_ms(var: &str) -> Option<Duration> {
    std::env::var(var)
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .map(Duration::from_millis)
}

/// Pause between `launchctl bootout` and `bootstrap` (default: 50ms).
pub fn launchctl_gap() -> Duration {
    parse_duration_ms("FIXTIM_LAUNCHCTL_GAP_MS").unwrap_or(Duration::from_millis(50))
}

/// Timeout applied to each launchctl/osascript/defaults call (default: 30s).
pub fn command_timeout() -> Duration {
    parse_duration_ms("FIXTIM_COMMAND_TIMEOUT_MS").unwrap_or(Duration::from_secs(30))
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
