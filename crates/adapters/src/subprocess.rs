// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Subprocess execution helpers

use std::time::Duration;

use ft_exec::{Invocation, Receipt};

use crate::{AdapterError, CommandRunner};

pub const LAUNCHCTL: &str = "/bin/launchctl";
pub const OSASCRIPT: &str = "/usr/bin/osascript";
pub const DEFAULTS: &str = "/usr/bin/defaults";
pub const KILLALL: &str = "/usr/bin/killall";
pub const OPEN: &str = "/usr/bin/open";
pub const PS: &str = "/bin/ps";
pub const ID: &str = "/usr/bin/id";

/// Default timeout for process table listing.
pub const PS_TIMEOUT: Duration = Duration::from_secs(10);

/// Default timeout for launchctl, osascript, defaults, and open calls.
pub fn command_timeout() -> Duration {
    crate::env::command_timeout()
}

/// Turn a receipt into an error unless the engine saw no fault and the
/// child exited 0.
pub fn check(receipt: Receipt, description: &str) -> Result<Receipt, AdapterError> {
    if let Some(error) = receipt.error {
        return Err(AdapterError::Exec {
            description: description.to_string(),
            error,
        });
    }
    if receipt.exit_code != 0 {
        return Err(AdapterError::ExitCode {
            description: description.to_string(),
            code: receipt.exit_code,
            stderr: receipt.stderr.trim().to_string(),
        });
    }
    Ok(receipt)
}

/// Run an invocation and require it to succeed.
pub async fn run_checked<R: CommandRunner>(
    runner: &R,
    invocation: Invocation,
    description: &str,
) -> Result<Receipt, AdapterError> {
    check(runner.run(invocation).await, description)
}

#[cfg(test)]
#[path = "subprocess_tests.rs"]
mod tests;
