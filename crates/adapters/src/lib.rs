// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]
// Enable coverage(off) attribute for excluding test infrastructure
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Adapters for the macOS facilities touched by a soft restart.
//!
//! Every external command goes through a [`CommandRunner`], so the
//! sequencing logic can be exercised against a [`FakeRunner`].

pub mod apps;
pub mod dock;
mod env;
mod error;
pub mod jobs;
pub mod launch_agents;
pub mod login_items;
pub mod runner;
pub mod subprocess;
pub mod traced;

pub use error::AdapterError;
pub use jobs::{Job, JobRegistry, LaunchctlJobs};
pub use login_items::LoginItem;
pub use runner::{CommandRunner, SpawnRunner};
pub use traced::TracedRunner;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use jobs::FakeJobs;
#[cfg(any(test, feature = "test-support"))]
pub use runner::{receipt_exit, receipt_ok, FakeRunner};
