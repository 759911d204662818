// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Soft restart: snapshot the session, stop every job, bring it back.
//!
//! Every step is best effort. A failure is logged and recorded in the
//! [`Report`], and the sequence moves on.

use std::path::PathBuf;
use std::time::Duration;

use ft_adapters::{apps, dock, launch_agents, login_items};
use ft_adapters::{CommandRunner, JobRegistry, LoginItem};
use serde::Serialize;

use crate::config::Settle;

/// Which parts of the session to restore
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RestartOptions {
    pub launch_agents: bool,
    pub login_items: bool,
    pub dry_run: bool,
}

impl Default for RestartOptions {
    fn default() -> Self {
        Self {
            launch_agents: true,
            login_items: true,
            dry_run: false,
        }
    }
}

/// What a restart found and did
#[derive(Debug, Default, Serialize)]
pub struct Report {
    pub dry_run: bool,
    pub applications: Vec<PathBuf>,
    pub launch_agents: Vec<PathBuf>,
    pub login_items: Vec<String>,
    /// Labels stopped, or that would be stopped in a dry run
    pub stopped: Vec<String>,
    pub failures: Vec<String>,
}

impl Report {
    fn failed(&mut self, step: &str, error: impl std::fmt::Display) {
        tracing::warn!(step, %error, "step failed");
        self.failures.push(format!("{step}: {error}"));
    }
}

/// Drives one restart against a runner and a job registry.
pub struct Restarter<R, J> {
    runner: R,
    jobs: J,
    dock_backup: PathBuf,
    launch_agents_dir: PathBuf,
    settle: Settle,
    options: RestartOptions,
    self_pid: u32,
}

impl<R: CommandRunner, J: JobRegistry> Restarter<R, J> {
    pub fn new(runner: R, jobs: J, dock_backup: PathBuf, launch_agents_dir: PathBuf) -> Self {
        Self {
            runner,
            jobs,
            dock_backup,
            launch_agents_dir,
            settle: Settle::default(),
            options: RestartOptions::default(),
            self_pid: std::process::id(),
        }
    }

    pub fn settle(mut self, settle: Settle) -> Self {
        self.settle = settle;
        self
    }

    pub fn options(mut self, options: RestartOptions) -> Self {
        self.options = options;
        self
    }

    /// Pid whose job is never stopped (defaults to this process).
    pub fn self_pid(mut self, pid: u32) -> Self {
        self.self_pid = pid;
        self
    }

    pub async fn run(&self) -> Report {
        let mut report = Report {
            dry_run: self.options.dry_run,
            ..Report::default()
        };

        tracing::info!("scanning app list");
        match apps::list_applications(&self.runner).await {
            Ok(found) => report.applications = found,
            Err(e) => report.failed("list applications", e),
        }

        if self.options.launch_agents {
            tracing::info!(dir = %self.launch_agents_dir.display(), "scanning LaunchAgents");
            report.launch_agents = launch_agents::list_launch_agents(&self.launch_agents_dir);
            tracing::info!(count = report.launch_agents.len(), "found LaunchAgents");
        }

        let mut items: Vec<LoginItem> = Vec::new();
        if self.options.login_items {
            tracing::info!("scanning Login Items");
            match login_items::list_login_items(&self.runner).await {
                Ok(found) => items = found,
                Err(e) => report.failed("list login items", e),
            }
            report.login_items = items.iter().map(|i| i.name.clone()).collect();
        }

        if self.options.dry_run {
            self.plan_stops(&mut report).await;
            return report;
        }

        tracing::info!(path = %self.dock_backup.display(), "backing up Dock layout");
        let backed_up = match dock::backup_dock(&self.runner, &self.dock_backup).await {
            Ok(()) => true,
            Err(e) => {
                report.failed("back up dock", e);
                false
            }
        };
        pause(self.settle.after_dock_backup).await;

        tracing::info!("starting restart");
        self.stop_jobs(&mut report).await;
        pause(self.settle.after_stop).await;

        tracing::info!("resuming apps");
        let mut failures = Vec::new();
        for bundle in &report.applications {
            tracing::info!(bundle = %bundle.display(), "launching app");
            if let Err(e) = apps::reopen_application(&self.runner, bundle).await {
                failures.push((format!("reopen {}", bundle.display()), e));
            }
        }
        for (step, e) in failures {
            report.failed(&step, e);
        }
        pause(self.settle.after_reopen).await;

        if !report.launch_agents.is_empty() {
            self.reload_launch_agents(&mut report).await;
            pause(self.settle.after_launch_agents).await;
        }

        if !items.is_empty() {
            tracing::info!(count = items.len(), "launching Login Items");
            for item in &items {
                if let Err(e) = login_items::launch_login_item(&self.runner, item).await {
                    report.failed(&format!("launch {}", item.name), e);
                }
            }
            pause(self.settle.after_login_items).await;
        }

        if backed_up {
            tracing::info!("restoring Dock layout");
            if let Err(e) = dock::restore_dock(&self.runner, &self.dock_backup).await {
                report.failed("restore dock", e);
            }
        } else {
            tracing::warn!("no Dock backup, leaving layout alone");
        }

        report
    }

    async fn plan_stops(&self, report: &mut Report) {
        match self.jobs.list().await {
            Ok(jobs) => {
                for job in jobs.into_iter().filter(|j| j.pid != self.self_pid) {
                    tracing::info!(label = %job.label, pid = job.pid, "would stop");
                    report.stopped.push(job.label);
                }
            }
            Err(e) => report.failed("list jobs", e),
        }
    }

    async fn stop_jobs(&self, report: &mut Report) {
        let jobs = match self.jobs.list().await {
            Ok(jobs) => jobs,
            Err(e) => {
                report.failed("list jobs", e);
                return;
            }
        };
        for job in jobs {
            if job.pid == self.self_pid {
                continue;
            }
            tracing::info!(label = %job.label, pid = job.pid, "terminating");
            match self.jobs.stop(&job.label).await {
                Ok(()) => report.stopped.push(job.label),
                Err(e) => report.failed(&format!("stop {}", job.label), e),
            }
        }
    }

    async fn reload_launch_agents(&self, report: &mut Report) {
        tracing::info!(count = report.launch_agents.len(), "reloading LaunchAgents");
        let uid = match launch_agents::current_uid(&self.runner).await {
            Ok(uid) => uid,
            Err(e) => {
                report.failed("resolve uid", e);
                return;
            }
        };
        let mut failures = Vec::new();
        for plist in &report.launch_agents {
            match launch_agents::reload_launch_agent(&self.runner, plist, uid).await {
                Ok(how) => tracing::info!(plist = %plist.display(), ?how, "reloaded"),
                Err(e) => failures.push((plist.display().to_string(), e)),
            }
        }
        for (plist, e) in failures {
            report.failed(&format!("reload {plist}"), e);
        }
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
#[path = "restart_tests.rs"]
mod tests;
