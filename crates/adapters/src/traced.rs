// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced runner wrapper for consistent observability

use async_trait::async_trait;
use ft_exec::{Invocation, Receipt};
use tracing::Instrument;

use crate::CommandRunner;

/// Wrapper that adds tracing to any CommandRunner
#[derive(Clone)]
pub struct TracedRunner<R> {
    inner: R,
}

impl<R> TracedRunner<R> {
    pub fn new(inner: R) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<R: CommandRunner> CommandRunner for TracedRunner<R> {
    async fn run(&self, invocation: Invocation) -> Receipt {
        let span = tracing::info_span!("command", cmd = %invocation.command().display());
        async {
            tracing::debug!(args = ?invocation.arguments(), "starting");
            let start = std::time::Instant::now();
            let receipt = self.inner.run(invocation).await;
            let elapsed_ms = start.elapsed().as_millis() as u64;
            match receipt.error {
                Some(e) => tracing::warn!(elapsed_ms, error = %e, "command failed"),
                None if receipt.exit_code != 0 => tracing::debug!(
                    elapsed_ms,
                    exit_code = receipt.exit_code,
                    stderr = receipt.stderr.trim(),
                    "command exited non-zero"
                ),
                None => tracing::debug!(elapsed_ms, pid = receipt.pid, "command finished"),
            }
            receipt
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
