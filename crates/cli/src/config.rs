// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Resolved runtime configuration

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use crate::env;

/// Errors resolving configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot determine documents directory; set FIXTIM_DOCK_BACKUP")]
    NoDocumentsDir,
    #[error("cannot determine home directory; set FIXTIM_LAUNCH_AGENTS_DIR")]
    NoHomeDir,
}

/// Pauses between restart phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settle {
    pub after_dock_backup: Duration,
    pub after_stop: Duration,
    pub after_reopen: Duration,
    pub after_launch_agents: Duration,
    pub after_login_items: Duration,
}

impl Settle {
    /// Delays expressed in multiples of `unit`.
    pub fn scaled(unit: Duration) -> Self {
        Self {
            after_dock_backup: unit,
            after_stop: unit * 5,
            after_reopen: unit,
            after_launch_agents: unit,
            after_login_items: unit,
        }
    }

    pub fn none() -> Self {
        Self::scaled(Duration::ZERO)
    }
}

impl Default for Settle {
    fn default() -> Self {
        Self::scaled(Duration::from_secs(1))
    }
}

/// Runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub dock_backup: PathBuf,
    pub launch_agents_dir: PathBuf,
    pub settle: Settle,
    pub log_file: Option<PathBuf>,
    pub exec_workers: usize,
}

impl Config {
    /// Resolve from `FIXTIM_*` overrides and platform directories.
    ///
    /// `log_file` from the command line wins over `FIXTIM_LOG_FILE`.
    pub fn load(log_file: Option<PathBuf>) -> Result<Self, ConfigError> {
        let dock_backup = match env::dock_backup() {
            Some(path) => path,
            None => ft_adapters::dock::default_backup_path().ok_or(ConfigError::NoDocumentsDir)?,
        };
        let launch_agents_dir = match env::launch_agents_dir() {
            Some(dir) => dir,
            None => ft_adapters::launch_agents::default_dir().ok_or(ConfigError::NoHomeDir)?,
        };
        let settle = env::settle_ms().map(Settle::scaled).unwrap_or_default();

        Ok(Self {
            dock_backup,
            launch_agents_dir,
            settle,
            log_file: log_file.or_else(env::log_file),
            exec_workers: env::exec_workers().unwrap_or(2),
        })
    }
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
