// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of launchd jobs: enumerate running jobs and stop them by label

mod launchctl;

pub use launchctl::{parse_job_table, LaunchctlJobs};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeJobs;

use async_trait::async_trait;

use crate::AdapterError;

/// A running job known to the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub label: String,
    pub pid: u32,
}

/// Adapter for the service manager's job registry
#[async_trait]
pub trait JobRegistry: Clone + Send + Sync + 'static {
    /// Jobs that currently have a process
    async fn list(&self) -> Result<Vec<Job>, AdapterError>;

    /// Ask the service manager to stop the job with `label`
    async fn stop(&self, label: &str) -> Result<(), AdapterError>;
}
