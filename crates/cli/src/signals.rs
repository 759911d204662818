// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Termination signals are swallowed while a restart is in progress.
//!
//! Stopping every job usually takes down the session that launched us;
//! the resulting hangup must not abort the sequence half way.

use tokio::signal::unix::{signal, SignalKind};
use tokio::task::JoinHandle;

fn ignored() -> [(SignalKind, &'static str); 5] {
    [
        (SignalKind::hangup(), "SIGHUP"),
        (SignalKind::interrupt(), "SIGINT"),
        (SignalKind::quit(), "SIGQUIT"),
        (SignalKind::terminate(), "SIGTERM"),
        (SignalKind::alarm(), "SIGALRM"),
    ]
}

/// Keeps the listeners alive; dropping it stops logging but the default
/// dispositions are not restored.
pub struct SignalShield {
    listeners: Vec<JoinHandle<()>>,
}

impl SignalShield {
    /// Register listeners for HUP, INT, QUIT, TERM and ALRM.
    pub fn install() -> std::io::Result<Self> {
        let mut listeners = Vec::new();
        for (kind, name) in ignored() {
            let mut stream = signal(kind)?;
            listeners.push(tokio::spawn(async move {
                while stream.recv().await.is_some() {
                    tracing::warn!(signal = name, "ignoring signal during restart");
                }
            }));
        }
        Ok(Self { listeners })
    }
}

impl Drop for SignalShield {
    fn drop(&mut self) {
        for listener in &self.listeners {
            listener.abort();
        }
    }
}

#[cfg(test)]
#[path = "signals_tests.rs"]
mod tests;
