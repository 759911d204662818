// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Spawning a child and wiring its output channels

use std::process::Stdio;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::process::Command;
use tracing::Instrument;

use crate::env::merged_env;
use crate::pipe::{open_pipe, OutputLock, PipeChannel, Stream};
use crate::timeout::TimeoutGuard;
use crate::waiter::ExitWaiter;
use crate::{ExecError, Hooks, Invocation, Receipt};

/// Run one invocation to completion on the current tokio runtime.
///
/// Never fails: spawn errors, pipe errors, wait errors and timeouts are
/// all reported through [`Receipt::error`]. `on_pid` is only called when
/// a process was actually started.
pub async fn run(invocation: Invocation, hooks: Hooks) -> Receipt {
    let span = tracing::debug_span!("exec", command = %invocation.command().display());
    spawn_and_wait(invocation, hooks).instrument(span).await
}

async fn spawn_and_wait(invocation: Invocation, hooks: Hooks) -> Receipt {
    let Hooks {
        on_pid,
        on_stdout,
        on_stderr,
    } = hooks;

    let (out_rx, out_tx) = match open_pipe() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(stream = "stdout", error = %e, "failed to open pipe");
            return Receipt::failure(ExecError::PipeOpenFailed);
        }
    };
    let (err_rx, err_tx) = match open_pipe() {
        Ok(pair) => pair,
        Err(e) => {
            tracing::error!(stream = "stderr", error = %e, "failed to open pipe");
            return Receipt::failure(ExecError::PipeOpenFailed);
        }
    };

    // The command holds the parent's copies of the write ends; dropping it
    // right after spawn leaves the child as the only writer, so the read
    // ends see EOF once the child (and anything it forked) exits.
    let spawned = {
        let mut cmd = Command::new(invocation.command());
        cmd.args(invocation.arguments())
            .env_clear()
            .envs(merged_env(invocation.env_overrides()))
            .stdin(Stdio::null())
            .stdout(Stdio::from(out_tx))
            .stderr(Stdio::from(err_tx))
            .kill_on_drop(true);
        cmd.spawn()
    };
    let mut child = match spawned {
        Ok(child) => child,
        Err(e) => {
            tracing::warn!(command = %invocation.display(), error = %e, "spawn failed");
            return Receipt::failure(ExecError::SpawnFailed);
        }
    };
    let Some(pid) = child.id() else {
        tracing::error!(command = %invocation.display(), "spawned child has no pid");
        let _ = child.start_kill();
        return Receipt::failure(ExecError::SpawnFailed);
    };
    tracing::debug!(pid, command = %invocation.display(), "spawned");

    if let Some(on_pid) = on_pid {
        on_pid(pid);
    }

    let output_lock: OutputLock = Arc::new(Mutex::new(()));
    let stdout = PipeChannel::new(Stream::Stdout, out_rx, on_stdout, Arc::clone(&output_lock));
    let stderr = PipeChannel::new(Stream::Stderr, err_rx, on_stderr, output_lock);
    let guard = TimeoutGuard::arm(invocation.effective_timeout());

    ExitWaiter::new(child, pid, guard, stdout.start(), stderr.start())
        .finish()
        .await
}
