// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake command runner for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::CommandRunner;
use async_trait::async_trait;
use ft_exec::{Invocation, Receipt};
use parking_lot::Mutex;
use std::sync::Arc;

/// Receipt for a clean exit with the given stdout.
pub fn receipt_ok(stdout: &str) -> Receipt {
    Receipt {
        exit_code: 0,
        pid: 4242,
        wait: 4242,
        error: None,
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Receipt for a child that exited with `code`.
pub fn receipt_exit(code: i32, stderr: &str) -> Receipt {
    Receipt {
        exit_code: code,
        stderr: stderr.to_string(),
        ..receipt_ok("")
    }
}

struct Rule {
    command: String,
    args_prefix: Vec<String>,
    receipt: Receipt,
}

impl Rule {
    fn matches(&self, invocation: &Invocation) -> bool {
        invocation.command().to_string_lossy() == self.command
            && invocation.arguments().starts_with(&self.args_prefix)
    }
}

struct FakeRunnerState {
    calls: Vec<Invocation>,
    rules: Vec<Rule>,
    fallback: Receipt,
}

/// Fake runner for testing.
///
/// Records every invocation and answers with the most recently registered
/// matching rule, or a clean empty exit.
#[derive(Clone)]
pub struct FakeRunner {
    inner: Arc<Mutex<FakeRunnerState>>,
}

impl Default for FakeRunner {
    fn default() -> Self {
        Self {
            inner: Arc::new(Mutex::new(FakeRunnerState {
                calls: Vec::new(),
                rules: Vec::new(),
                fallback: receipt_ok(""),
            })),
        }
    }
}

impl FakeRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer `command` invoked with arguments starting with `args_prefix`.
    pub fn respond(&self, command: &str, args_prefix: &[&str], receipt: Receipt) {
        self.inner.lock().rules.push(Rule {
            command: command.to_string(),
            args_prefix: args_prefix.iter().map(|a| a.to_string()).collect(),
            receipt,
        });
    }

    /// Receipt returned when no rule matches.
    pub fn fallback(&self, receipt: Receipt) {
        self.inner.lock().fallback = receipt;
    }

    /// Get all recorded invocations
    pub fn calls(&self) -> Vec<Invocation> {
        self.inner.lock().calls.clone()
    }

    /// Recorded invocations rendered as command lines
    pub fn command_lines(&self) -> Vec<String> {
        self.inner.lock().calls.iter().map(Invocation::display).collect()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: Invocation) -> Receipt {
        let mut state = self.inner.lock();
        let receipt = state
            .rules
            .iter()
            .rev()
            .find(|rule| rule.matches(&invocation))
            .map(|rule| rule.receipt.clone())
            .unwrap_or_else(|| state.fallback.clone());
        state.calls.push(invocation);
        receipt
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
