// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The completion record for one invocation

use serde::{Deserialize, Serialize};

use crate::ExecError;

/// How an invocation ended. Produced exactly once per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    /// Child exit code, `128 + signal` when killed by a signal, or -1 when
    /// the engine never observed a meaningful exit.
    pub exit_code: i32,
    /// Child pid, or -1 if no process was started.
    pub pid: i32,
    /// Result of reaping the child (its pid), or -1 if not observed.
    pub wait: i32,
    /// Engine-side fault, if any. `None` says nothing about the child's
    /// own success.
    pub error: Option<ExecError>,
    pub stdout: String,
    pub stderr: String,
}

impl Receipt {
    /// Receipt for an invocation that failed before or while waiting on a
    /// process.
    pub fn failure(error: ExecError) -> Self {
        Self {
            exit_code: -1,
            pid: -1,
            wait: -1,
            error: Some(error),
            stdout: String::new(),
            stderr: String::new(),
        }
    }

    /// True when the engine saw no fault and the child exited with 0.
    pub fn success(&self) -> bool {
        self.error.is_none() && self.exit_code == 0
    }

    pub fn timed_out(&self) -> bool {
        self.error == Some(ExecError::Timeout)
    }
}

#[cfg(test)]
#[path = "receipt_tests.rs"]
mod tests;
