// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `fixtim exec` - run one command through the execution engine

use std::io::Write;

use anyhow::Result;
use clap::Args;
use ft_exec::{timeout_from_secs, Engine, ExecError, Hooks, Invocation, Receipt};

use crate::exit_error::ExitError;
use crate::output::{print_json, OutputFormat};

#[derive(Args, Debug)]
pub struct ExecArgs {
    /// Kill the command after this many seconds (0 = no limit)
    #[arg(long, default_value_t = 0.0)]
    pub timeout: f64,

    /// Extra environment variable for the command (repeatable)
    #[arg(long = "env", value_name = "KEY=VALUE", value_parser = parse_env)]
    pub env: Vec<(String, String)>,

    /// Command name or path
    pub command: String,

    /// Arguments passed to the command
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

fn parse_env(raw: &str) -> Result<(String, String), String> {
    ft_exec::env::parse_entry(raw)
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got '{raw}'"))
}

pub fn handle(args: ExecArgs, engine: &Engine, format: OutputFormat) -> Result<()> {
    let receipt = match engine.resolve(&args.command) {
        Ok(path) => {
            let invocation = Invocation::new(path)
                .args(args.args)
                .envs(args.env)
                .timeout(timeout_from_secs(args.timeout));
            engine.execute(invocation, hooks_for(format))
        }
        Err(e) => Receipt::failure(e),
    };

    if format == OutputFormat::Json {
        print_json(&receipt)?;
    }

    let code = exit_code(&receipt);
    match receipt.error {
        None if code == 0 => Ok(()),
        None => Err(ExitError::silent(code).into()),
        Some(e) => Err(ExitError::new(code, format!("{}: {e}", args.command)).into()),
    }
}

/// Text output streams the child's output live; JSON waits for the receipt.
fn hooks_for(format: OutputFormat) -> Hooks {
    match format {
        OutputFormat::Json => Hooks::new(),
        OutputFormat::Text => Hooks::new()
            .on_stdout(|chunk| {
                let mut out = std::io::stdout().lock();
                let _ = out.write_all(chunk.as_bytes());
                let _ = out.flush();
            })
            .on_stderr(|chunk| {
                let mut err = std::io::stderr().lock();
                let _ = err.write_all(chunk.as_bytes());
            }),
    }
}

/// Process exit code mirroring the child, with shell conventions for
/// failures that left no child status.
pub fn exit_code(receipt: &Receipt) -> i32 {
    if receipt.exit_code >= 0 {
        return receipt.exit_code;
    }
    match receipt.error {
        Some(ExecError::CommandNotFound) => 127,
        Some(ExecError::CommandInvalid) | Some(ExecError::SpawnFailed) => 126,
        _ => 1,
    }
}

#[cfg(test)]
#[path = "exec_tests.rs"]
mod tests;
