// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Runner backed by the real exec engine

use async_trait::async_trait;
use ft_exec::{Hooks, Invocation, Receipt};

use super::CommandRunner;

/// Spawns real processes on the current tokio runtime.
#[derive(Clone, Copy, Debug, Default)]
pub struct SpawnRunner;

impl SpawnRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for SpawnRunner {
    async fn run(&self, invocation: Invocation) -> Receipt {
        let hooks = Hooks::new()
            .on_pid(|pid| tracing::trace!(pid, "child started"))
            .on_stderr(|chunk| tracing::trace!(chunk, "child stderr"));
        ft_exec::run(invocation, hooks).await
    }
}

#[cfg(test)]
#[path = "spawn_tests.rs"]
mod tests;
