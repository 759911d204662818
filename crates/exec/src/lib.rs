// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Process execution engine.
//!
//! Launches one child process per invocation, captures its standard
//! output and standard error concurrently and incrementally, enforces a
//! wall-clock timeout with a forced kill, and produces exactly one
//! [`Receipt`] describing how the invocation ended.
//!
//! # Quick Start
//!
//! ```no_run
//! use ft_exec::{Engine, Hooks, Invocation};
//! use std::time::Duration;
//!
//! let engine = Engine::new()?;
//! let receipt = engine.execute(
//!     Invocation::new("/bin/echo").arg("hello").timeout(Duration::from_secs(5)),
//!     Hooks::new().on_stdout(|chunk| print!("{chunk}")),
//! );
//! assert_eq!(receipt.stdout, "hello\n");
//! # Ok::<(), std::io::Error>(())
//! ```
//!
//! # Structure
//!
//! ```text
//! run()
//! ├── env::merged_env          parent environment + overrides
//! ├── PipeChannel (stdout)     non-blocking reads, accumulation, callback
//! ├── PipeChannel (stderr)
//! └── ExitWaiter               reaps the child, owns the TimeoutGuard,
//!                              cancels and joins both channels
//! ```
//!
//! No function in this crate returns an error for a failed invocation:
//! every failure is recorded in [`Receipt::error`].

mod decode;
mod engine;
pub mod env;
mod error;
mod invocation;
mod pipe;
mod receipt;
mod resolve;
mod spawn;
mod timeout;
mod waiter;

pub use engine::Engine;
pub use error::ExecError;
pub use invocation::{timeout_from_secs, Hooks, Invocation, MAX_TIMEOUT};
pub use receipt::Receipt;
pub use resolve::PathCache;
pub use spawn::run;
