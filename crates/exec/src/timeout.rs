// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Single-shot wall-clock deadline for one child

use std::future::pending;
use std::pin::Pin;
use std::time::Duration;

use tokio::process::Child;
use tokio::time::Sleep;

/// Arms a deadline at invocation start. When it fires first, the child is
/// sent SIGKILL and the invocation is classified as timed out, whatever
/// exit status the killed child later reports.
///
/// Only the exit waiter touches the guard, so firing and exit detection
/// are never processed at the same time.
pub(crate) struct TimeoutGuard {
    deadline: Option<Pin<Box<Sleep>>>,
    fired: bool,
}

impl TimeoutGuard {
    pub(crate) fn arm(timeout: Duration) -> Self {
        Self {
            deadline: Some(Box::pin(tokio::time::sleep(timeout))),
            fired: false,
        }
    }

    pub(crate) fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub(crate) fn fired(&self) -> bool {
        self.fired
    }

    /// Resolves when the deadline passes. Never resolves once disarmed.
    pub(crate) async fn expired(&mut self) {
        match self.deadline.as_mut() {
            Some(deadline) => deadline.as_mut().await,
            None => pending().await,
        }
    }

    /// Record the timeout and force-kill the child.
    pub(crate) fn fire(&mut self, child: &mut Child) {
        self.deadline = None;
        self.fired = true;
        if let Err(e) = child.start_kill() {
            // Already exited; the pending wait will reap it
            tracing::debug!(pid = ?child.id(), error = %e, "kill after timeout failed");
        }
    }

    /// Cancel the deadline after a normal exit so no late signal is sent.
    pub(crate) fn disarm(&mut self) {
        self.deadline = None;
    }
}

#[cfg(test)]
#[path = "timeout_tests.rs"]
mod tests;
