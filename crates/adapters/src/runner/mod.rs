// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command runners: the seam between restart logic and the exec engine

mod spawn;

pub use spawn::SpawnRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{receipt_exit, receipt_ok, FakeRunner};

use async_trait::async_trait;
use ft_exec::{Invocation, Receipt};

/// Runs one external command to completion.
///
/// Implementations never fail: faults are reported in the receipt.
#[async_trait]
pub trait CommandRunner: Clone + Send + Sync + 'static {
    async fn run(&self, invocation: Invocation) -> Receipt;
}
