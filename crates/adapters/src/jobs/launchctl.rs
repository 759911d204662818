// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! launchctl-backed job registry

use async_trait::async_trait;
use ft_exec::Invocation;

use super::{Job, JobRegistry};
use crate::subprocess::{command_timeout, run_checked, LAUNCHCTL};
use crate::{AdapterError, CommandRunner};

/// Job registry that talks to launchd through `launchctl`
#[derive(Clone)]
pub struct LaunchctlJobs<R> {
    runner: R,
}

impl<R: CommandRunner> LaunchctlJobs<R> {
    pub fn new(runner: R) -> Self {
        Self { runner }
    }
}

#[async_trait]
impl<R: CommandRunner> JobRegistry for LaunchctlJobs<R> {
    async fn list(&self) -> Result<Vec<Job>, AdapterError> {
        let invocation = Invocation::new(LAUNCHCTL)
            .arg("list")
            .timeout(command_timeout());
        let receipt = run_checked(&self.runner, invocation, "launchctl list").await?;
        Ok(parse_job_table(&receipt.stdout))
    }

    async fn stop(&self, label: &str) -> Result<(), AdapterError> {
        let invocation = Invocation::new(LAUNCHCTL)
            .args(["stop", label])
            .timeout(command_timeout());
        run_checked(&self.runner, invocation, "launchctl stop").await?;
        Ok(())
    }
}

/// Parse `launchctl list` output (`PID<TAB>Status<TAB>Label` rows).
///
/// The header row and jobs without a process (`-` in the PID column) are
/// skipped.
pub fn parse_job_table(output: &str) -> Vec<Job> {
    output
        .lines()
        .filter_map(|line| {
            let mut cols = line.split('\t');
            let pid = cols.next()?.trim().parse::<u32>().ok()?;
            let _status = cols.next()?;
            let label = cols.next()?.trim();
            if pid == 0 || label.is_empty() {
                return None;
            }
            Some(Job {
                label: label.to_string(),
                pid,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "launchctl_tests.rs"]
mod tests;
