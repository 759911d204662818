// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! fixtim - soft-restart a macOS login session without logging out

mod config;
mod env;
mod exec;
mod exit_error;
mod logging;
mod output;
mod restart;
mod signals;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use ft_adapters::{LaunchctlJobs, SpawnRunner, TracedRunner};
use ft_exec::Engine;

use config::Config;
use output::OutputFormat;
use restart::{RestartOptions, Restarter};

#[derive(Parser)]
#[command(
    name = "fixtim",
    version,
    about = "Stop every user job and bring the session back, like a logout without logging out"
)]
struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value_t,
        global = true
    )]
    output: OutputFormat,

    /// Also write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Do not reload LaunchAgents after the restart
    #[arg(long)]
    no_launch_agents: bool,

    /// Do not relaunch Login Items after the restart
    #[arg(long)]
    no_login_items: bool,

    /// List what would be restarted without stopping anything
    #[arg(long)]
    dry_run: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a single command with a timeout and report how it ended
    Exec(exec::ExecArgs),
}

fn main() {
    if let Err(e) = run() {
        let code = e
            .downcast_ref::<exit_error::ExitError>()
            .map_or(1, |c| c.code);
        let msg = format_error(&e);
        if !msg.is_empty() {
            eprintln!("Error: {}", msg);
        }
        std::process::exit(code);
    }
}

/// Format an anyhow error, skipping the cause chain when the top-level
/// message already contains it.
fn format_error(err: &anyhow::Error) -> String {
    let top = err.to_string();
    let chain_redundant = err
        .chain()
        .skip(1)
        .all(|cause| top.contains(&cause.to_string()));
    if chain_redundant {
        return top;
    }

    let mut buf = top;
    for (i, cause) in err.chain().skip(1).enumerate() {
        buf.push_str(&format!("\n\nCaused by:\n    {}: {}", i, cause));
    }
    buf
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.log_file.clone())?;
    let _log_guard = logging::setup_logging(config.log_file.as_deref())
        .context("failed to set up logging")?;

    match cli.command {
        Some(Commands::Exec(args)) => {
            let engine = Engine::with_workers(config.exec_workers)
                .context("failed to start execution engine")?;
            exec::handle(args, &engine, cli.output)
        }
        None => {
            let options = RestartOptions {
                launch_agents: !cli.no_launch_agents,
                login_items: !cli.no_login_items,
                dry_run: cli.dry_run,
            };
            restart(config, options, cli.output)
        }
    }
}

fn restart(config: Config, options: RestartOptions, format: OutputFormat) -> Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start runtime")?;

    let report = runtime.block_on(async {
        let _shield = if options.dry_run {
            None
        } else {
            Some(signals::SignalShield::install().context("failed to install signal handlers")?)
        };
        let runner = TracedRunner::new(SpawnRunner::new());
        let restarter = Restarter::new(
            runner.clone(),
            LaunchctlJobs::new(runner),
            config.dock_backup,
            config.launch_agents_dir,
        )
        .settle(config.settle)
        .options(options);
        anyhow::Ok(restarter.run().await)
    })?;

    match format {
        OutputFormat::Json => output::print_json(&report)?,
        OutputFormat::Text => {
            if report.dry_run {
                print_plan(&report);
            }
            let verb = if report.dry_run { "would stop" } else { "stopped" };
            println!(
                "{} applications, {} LaunchAgents, {} Login Items; {} {} jobs",
                report.applications.len(),
                report.launch_agents.len(),
                report.login_items.len(),
                verb,
                report.stopped.len(),
            );
            for failure in &report.failures {
                println!("  failed: {failure}");
            }
        }
    }
    Ok(())
}

fn print_plan(report: &restart::Report) {
    for app in &report.applications {
        println!("reopen      {}", app.display());
    }
    for plist in &report.launch_agents {
        println!("reload      {}", plist.display());
    }
    for item in &report.login_items {
        println!("login item  {item}");
    }
    for label in &report.stopped {
        println!("stop        {label}");
    }
}

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;
