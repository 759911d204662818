// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Exit waiter: owns the child from spawn until its status is reaped

use std::os::unix::process::ExitStatusExt;
use std::process::ExitStatus;

use tokio::process::Child;

use crate::pipe::ChannelHandle;
use crate::timeout::TimeoutGuard;
use crate::{ExecError, Receipt};

pub(crate) struct ExitWaiter {
    child: Child,
    pid: u32,
    guard: TimeoutGuard,
    stdout: ChannelHandle,
    stderr: ChannelHandle,
}

impl ExitWaiter {
    pub(crate) fn new(
        child: Child,
        pid: u32,
        guard: TimeoutGuard,
        stdout: ChannelHandle,
        stderr: ChannelHandle,
    ) -> Self {
        Self {
            child,
            pid,
            guard,
            stdout,
            stderr,
        }
    }

    /// Wait for the child to exit, then close both channels and build the
    /// receipt.
    ///
    /// Exit detection and timeout firing are handled by this one task, so
    /// they are strictly ordered. The receipt is only built once the exit
    /// status is reaped, the guard is disarmed or fired, and both channels
    /// have closed.
    pub(crate) async fn finish(self) -> Receipt {
        let Self {
            mut child,
            pid,
            mut guard,
            mut stdout,
            mut stderr,
        } = self;

        let waited = loop {
            tokio::select! {
                status = child.wait() => break status,
                () = guard.expired(), if guard.is_armed() => {
                    tracing::warn!(pid, "deadline reached, killing process");
                    guard.fire(&mut child);
                }
            }
        };
        guard.disarm();

        stdout.cancel();
        stderr.cancel();
        let stdout = stdout.closed().await;
        let stderr = stderr.closed().await;

        let pid = i32::try_from(pid).unwrap_or(-1);
        let (exit_code, wait, fault) = match waited {
            Ok(status) => (exit_code(status), pid, None),
            Err(e) => {
                tracing::error!(pid, error = %e, "failed to reap process");
                (-1, -1, Some(ExecError::WaitFailed))
            }
        };
        let error = if guard.fired() {
            Some(ExecError::Timeout)
        } else {
            fault
        };

        tracing::debug!(pid, exit_code, ?error, "process finished");
        Receipt {
            exit_code,
            pid,
            wait,
            error,
            stdout,
            stderr,
        }
    }
}

/// The child's exit code, or `128 + signal` when it was killed.
pub(crate) fn exit_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => 128 + signal,
        (None, None) => -1,
    }
}

#[cfg(test)]
#[path = "waiter_tests.rs"]
mod tests;
