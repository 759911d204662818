// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Invocation requests and the callbacks attached to them

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

/// Upper bound used when no timeout is requested.
///
/// The guard always arms a real deadline rather than waiting forever.
pub const MAX_TIMEOUT: Duration = Duration::from_secs(2_147_483_647);

/// A single request to run one external command to completion.
///
/// Built by the caller, consumed once by [`crate::run`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    command: PathBuf,
    args: Vec<String>,
    env: BTreeMap<String, String>,
    timeout: Duration,
}

impl Invocation {
    /// Create an invocation for the binary at `command`.
    ///
    /// `command` is handed to the OS untouched; a missing or non-executable
    /// path is reported as [`crate::ExecError::SpawnFailed`].
    pub fn new(command: impl Into<PathBuf>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            env: BTreeMap::new(),
            timeout: Duration::ZERO,
        }
    }

    /// Append one argument (argv[1..]; argv[0] is the command itself).
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments.
    pub fn args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Set an environment override for the child.
    pub fn env(mut self, key: impl Into<String>, val: impl Into<String>) -> Self {
        self.env.insert(key.into(), val.into());
        self
    }

    /// Set multiple environment overrides.
    pub fn envs(
        mut self,
        vars: impl IntoIterator<Item = (impl Into<String>, impl Into<String>)>,
    ) -> Self {
        for (k, v) in vars {
            self.env.insert(k.into(), v.into());
        }
        self
    }

    /// Set the wall-clock limit. `Duration::ZERO` means no enforced limit.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn command(&self) -> &std::path::Path {
        &self.command
    }

    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    pub fn env_overrides(&self) -> &BTreeMap<String, String> {
        &self.env
    }

    pub fn requested_timeout(&self) -> Duration {
        self.timeout
    }

    /// The deadline the timeout guard actually arms.
    pub fn effective_timeout(&self) -> Duration {
        if self.timeout.is_zero() {
            MAX_TIMEOUT
        } else {
            self.timeout.min(MAX_TIMEOUT)
        }
    }

    /// Command line rendered for logs.
    pub fn display(&self) -> String {
        let mut line = self.command.display().to_string();
        for arg in &self.args {
            line.push(' ');
            line.push_str(arg);
        }
        line
    }
}

/// Convert a timeout given in (possibly fractional) seconds.
///
/// Zero, negative, and NaN values mean "no enforced limit".
pub fn timeout_from_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(MAX_TIMEOUT)
}

pub(crate) type PidHook = Box<dyn FnOnce(u32) + Send>;
pub(crate) type ChunkHook = Box<dyn FnMut(&str) + Send>;

/// Optional callbacks for a single invocation.
///
/// Chunk callbacks run on engine workers. Calls for stdout and stderr are
/// serialized against each other, so a callback never runs concurrently
/// with the other stream's callback for the same invocation.
#[derive(Default)]
pub struct Hooks {
    pub(crate) on_pid: Option<PidHook>,
    pub(crate) on_stdout: Option<ChunkHook>,
    pub(crate) on_stderr: Option<ChunkHook>,
}

impl Hooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called once, synchronously, as soon as the child's pid is known.
    pub fn on_pid(mut self, f: impl FnOnce(u32) + Send + 'static) -> Self {
        self.on_pid = Some(Box::new(f));
        self
    }

    /// Called for every chunk read from standard output.
    pub fn on_stdout(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_stdout = Some(Box::new(f));
        self
    }

    /// Called for every chunk read from standard error.
    pub fn on_stderr(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_stderr = Some(Box::new(f));
        self
    }

    /// Route both streams into a single callback.
    pub fn merged(f: impl FnMut(&str) + Send + 'static) -> Self {
        let shared = Arc::new(Mutex::new(f));
        let err_sink = Arc::clone(&shared);
        Self::new()
            .on_stdout(move |chunk| {
                let mut f = shared.lock();
                (*f)(chunk)
            })
            .on_stderr(move |chunk| {
                let mut f = err_sink.lock();
                (*f)(chunk)
            })
    }
}

impl fmt::Debug for Hooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Hooks")
            .field("on_pid", &self.on_pid.is_some())
            .field("on_stdout", &self.on_stdout.is_some())
            .field("on_stderr", &self.on_stderr.is_some())
            .finish()
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
