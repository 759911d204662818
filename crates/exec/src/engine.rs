// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Engine instance with its own worker pool

use std::io;
use std::path::PathBuf;

use tokio::runtime::{Builder, Runtime};
use tokio::sync::oneshot;

use crate::{run, ExecError, Hooks, Invocation, PathCache, Receipt};

/// Default number of worker threads driving pipes and exit waiters.
const DEFAULT_WORKERS: usize = 2;

/// Runs invocations on a dedicated, fixed-size tokio worker pool.
///
/// Use this from synchronous code. Async callers already on a tokio
/// runtime can call [`crate::run`] directly.
///
/// Dropping an engine shuts its pool down; in-flight children are killed.
/// Neither [`Engine::execute`] nor dropping may happen inside an async
/// context.
#[derive(Debug)]
pub struct Engine {
    runtime: Runtime,
    paths: PathCache,
}

impl Engine {
    pub fn new() -> io::Result<Self> {
        Self::with_workers(DEFAULT_WORKERS)
    }

    pub fn with_workers(workers: usize) -> io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(workers.max(1))
            .thread_name("ft-exec")
            .enable_io()
            .enable_time()
            .build()?;
        Ok(Self {
            runtime,
            paths: PathCache::new(),
        })
    }

    /// Replace the path cache used by [`Engine::resolve`].
    pub fn with_paths(mut self, paths: PathCache) -> Self {
        self.paths = paths;
        self
    }

    /// Run an invocation and block until its receipt exists.
    pub fn execute(&self, invocation: Invocation, hooks: Hooks) -> Receipt {
        let (tx, rx) = oneshot::channel();
        self.spawn(invocation, hooks, move |receipt| {
            let _ = tx.send(receipt);
        });
        match rx.blocking_recv() {
            Ok(receipt) => receipt,
            Err(_) => {
                // The worker died before delivering, most likely a panicking hook
                tracing::error!("invocation dropped before completion");
                Receipt::failure(ExecError::WaitFailed)
            }
        }
    }

    /// Start an invocation and return immediately. `on_complete` is called
    /// exactly once, on a worker thread, with the receipt.
    pub fn spawn(
        &self,
        invocation: Invocation,
        hooks: Hooks,
        on_complete: impl FnOnce(Receipt) + Send + 'static,
    ) {
        self.runtime.spawn(async move {
            let receipt = run(invocation, hooks).await;
            on_complete(receipt);
        });
    }

    /// Resolve a bare command name to an absolute path.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ExecError> {
        self.paths.resolve(name)
    }

    /// Resolve `name` and run it with `args`. Resolution failures are
    /// reported as receipts like any other failure.
    pub fn execute_named(
        &self,
        name: &str,
        args: impl IntoIterator<Item = impl Into<String>>,
        hooks: Hooks,
    ) -> Receipt {
        match self.resolve(name) {
            Ok(path) => self.execute(Invocation::new(path).args(args), hooks),
            Err(e) => {
                tracing::warn!(name, error = %e, "cannot resolve command");
                Receipt::failure(e)
            }
        }
    }
}

#[cfg(test)]
#[path = "engine_tests.rs"]
mod tests;
