// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake job registry for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{Job, JobRegistry};
use crate::AdapterError;
use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::HashSet;
use std::sync::Arc;

struct FakeJobsState {
    jobs: Vec<Job>,
    failing: HashSet<String>,
    stopped: Vec<String>,
}

/// Fake job registry for testing
#[derive(Clone)]
pub struct FakeJobs {
    inner: Arc<Mutex<FakeJobsState>>,
}

impl Default for FakeJobs {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeJobsState {
                jobs: Vec::new(),
                failing: HashSet::new(),
                stopped: Vec::new(),
            })),
        }
    }
}

impl FakeJobs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, label: &str, pid: u32) {
        self.inner.lock().jobs.push(Job {
            label: label.to_string(),
            pid,
        });
    }

    /// Make `stop(label)` fail
    pub fn fail_stop(&self, label: &str) {
        self.inner.lock().failing.insert(label.to_string());
    }

    /// Labels passed to `stop`, in order
    pub fn stopped(&self) -> Vec<String> {
        self.inner.lock().stopped.clone()
    }
}

#[async_trait]
impl JobRegistry for FakeJobs {
    async fn list(&self) -> Result<Vec<Job>, AdapterError> {
        Ok(self.inner.lock().jobs.clone())
    }

    async fn stop(&self, label: &str) -> Result<(), AdapterError> {
        let mut state = self.inner.lock();
        state.stopped.push(label.to_string());
        if state.failing.contains(label) {
            return Err(AdapterError::ExitCode {
                description: "stop".to_string(),
                code: 3,
                stderr: format!("cannot stop {label}"),
            });
        }
        state.jobs.retain(|j| j.label != label);
        Ok(())
    }
}
