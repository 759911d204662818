// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use ft_exec::ExecError;
use thiserror::Error;

/// Errors from restart adapters
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("{description} failed: {error}")]
    Exec {
        description: String,
        error: ExecError,
    },
    #[error("{description} exited with {code}: {stderr}")]
    ExitCode {
        description: String,
        code: i32,
        stderr: String,
    },
    #[error("unexpected output from {description}: {detail}")]
    Parse { description: String, detail: String },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
