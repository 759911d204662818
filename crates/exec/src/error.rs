// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error classification recorded in a [`crate::Receipt`]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Faults encountered by the engine itself.
///
/// Absence of an error does not mean the child succeeded, only that the
/// engine ran it to completion. Inspect [`crate::Receipt::exit_code`] for
/// the child's own verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecError {
    /// No executable with that name on the search path.
    #[error("command not found")]
    CommandNotFound,
    /// A candidate exists but is not an executable file.
    #[error("command invalid")]
    CommandInvalid,
    /// An output pipe could not be created or made non-blocking.
    #[error("failed to open output pipe")]
    PipeOpenFailed,
    #[error("failed to spawn process")]
    SpawnFailed,
    /// Reaping the child's exit status failed.
    #[error("failed to wait for process")]
    WaitFailed,
    #[error("timed out")]
    Timeout,
}
