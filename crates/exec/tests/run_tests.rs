// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! End-to-end tests for running real child processes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use ft_exec::{run, ExecError, Hooks, Invocation};
use parking_lot::Mutex;
use tokio::task::JoinSet;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sh(script: &str) -> Invocation {
    Invocation::new("/bin/sh").args(["-c", script])
}

fn is_running(pid: i32) -> bool {
    std::process::Command::new("kill")
        .args(["-0", &pid.to_string()])
        .stderr(std::process::Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

// ---------------------------------------------------------------------------
// Output capture
// ---------------------------------------------------------------------------

#[tokio::test]
async fn echo_captures_stdout_exactly() {
    let receipt = run(Invocation::new("/bin/echo").arg("hello"), Hooks::new()).await;

    assert_eq!(receipt.stdout, "hello\n");
    assert_eq!(receipt.stderr, "");
    assert_eq!(receipt.exit_code, 0);
    assert_eq!(receipt.error, None);
    assert!(receipt.success());
}

#[tokio::test]
async fn stderr_and_exit_code_are_reported() {
    let receipt = run(sh("echo out; echo err >&2; exit 3"), Hooks::new()).await;

    assert_eq!(receipt.stdout, "out\n");
    assert_eq!(receipt.stderr, "err\n");
    assert_eq!(receipt.exit_code, 3);
    assert_eq!(receipt.error, None);
    assert!(!receipt.success());
}

#[tokio::test]
async fn signal_death_maps_to_128_plus_signal() {
    let receipt = run(sh("kill -9 $$"), Hooks::new()).await;
    assert_eq!(receipt.exit_code, 137);
    assert_eq!(receipt.error, None);
}

#[tokio::test]
async fn large_output_is_not_truncated() {
    let receipt = run(sh("i=0; while [ $i -lt 2000 ]; do echo line-$i; i=$((i+1)); done"), Hooks::new()).await;
    assert_eq!(receipt.stdout.lines().count(), 2000);
    assert_eq!(receipt.stdout.lines().last(), Some("line-1999"));
}

#[tokio::test]
async fn background_grandchild_does_not_block_completion() {
    let start = Instant::now();
    let receipt = tokio::time::timeout(
        Duration::from_secs(2),
        run(sh("sleep 3 & echo parent-done"), Hooks::new()),
    )
    .await
    .expect("completion must not wait for the grandchild");

    assert_eq!(receipt.stdout, "parent-done\n");
    assert!(start.elapsed() < Duration::from_secs(2));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn output_written_just_before_exit_survives_open_pipe() {
    let script = "sleep 2 & i=0; while [ $i -lt 300 ]; do echo line-$i; i=$((i+1)); done; printf tail";
    let expected: String = (0..300)
        .map(|i| format!("line-{i}\n"))
        .chain(std::iter::once("tail".to_string()))
        .collect();

    let mut runs = JoinSet::new();
    for _ in 0..24 {
        runs.spawn(run(sh(script), Hooks::new()));
    }
    while let Some(receipt) = runs.join_next().await {
        let receipt = receipt.unwrap();
        assert_eq!(receipt.error, None);
        assert_eq!(receipt.exit_code, 0);
        assert_eq!(receipt.stdout, expected);
    }
}

// ---------------------------------------------------------------------------
// Timeouts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn timeout_kills_long_running_child() {
    let receipt = run(
        Invocation::new("/bin/sleep")
            .arg("30")
            .timeout(Duration::from_millis(200)),
        Hooks::new(),
    )
    .await;

    assert_eq!(receipt.error, Some(ExecError::Timeout));
    assert!(receipt.timed_out());
    assert!(receipt.pid > 0);
    assert_eq!(receipt.exit_code, 137);
    assert!(!is_running(receipt.pid));
}

#[tokio::test]
async fn timeout_preserves_partial_output() {
    let receipt = run(
        sh("echo before; sleep 30").timeout(Duration::from_millis(300)),
        Hooks::new(),
    )
    .await;

    assert_eq!(receipt.error, Some(ExecError::Timeout));
    assert_eq!(receipt.stdout, "before\n");
}

#[tokio::test]
async fn fast_child_is_not_marked_timed_out() {
    let receipt = run(
        Invocation::new("/bin/echo")
            .arg("quick")
            .timeout(Duration::from_secs(10)),
        Hooks::new(),
    )
    .await;
    assert_eq!(receipt.error, None);
}

// ---------------------------------------------------------------------------
// Spawn failures
// ---------------------------------------------------------------------------

#[yare::parameterized(
    missing        = { "/nonexistent/binary" },
    directory      = { "/" },
)]
#[test_macro(tokio::test)]
async fn spawn_failure_never_reports_a_pid(command: &str) {
    let called = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&called);
    let receipt = run(
        Invocation::new(command),
        Hooks::new().on_pid(move |_| flag.store(true, Ordering::SeqCst)),
    )
    .await;

    assert_eq!(receipt.error, Some(ExecError::SpawnFailed));
    assert_eq!(receipt.pid, -1);
    assert_eq!(receipt.exit_code, -1);
    assert_eq!(receipt.wait, -1);
    assert!(!called.load(Ordering::SeqCst));
}

#[tokio::test]
async fn non_executable_file_fails_at_spawn() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("script");
    std::fs::write(&path, "#!/bin/sh\necho hi\n").unwrap();

    let receipt = run(Invocation::new(&path), Hooks::new()).await;
    assert_eq!(receipt.error, Some(ExecError::SpawnFailed));
    assert_eq!(receipt.pid, -1);
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_invocations_do_not_mix_output() {
    let mut set = JoinSet::new();
    for i in 0..16 {
        set.spawn(async move {
            let script = format!("for n in 1 2 3 4 5; do echo out-{i}; echo err-{i} >&2; done");
            (i, run(sh(&script), Hooks::new()).await)
        });
    }

    let mut seen = 0;
    while let Some(joined) = set.join_next().await {
        let (i, receipt) = joined.unwrap();
        seen += 1;
        assert_eq!(receipt.stdout, format!("out-{i}\n").repeat(5));
        assert_eq!(receipt.stderr, format!("err-{i}\n").repeat(5));
    }
    assert_eq!(seen, 16);
}

// ---------------------------------------------------------------------------
// Callbacks
// ---------------------------------------------------------------------------

#[tokio::test]
async fn chunks_arrive_before_receipt_and_never_after() {
    let events = Arc::new(Mutex::new(Vec::<String>::new()));
    let out_events = Arc::clone(&events);
    let err_events = Arc::clone(&events);
    let pid_events = Arc::clone(&events);

    let receipt = run(
        sh("echo a; echo b >&2; echo c"),
        Hooks::new()
            .on_pid(move |_| pid_events.lock().push("pid".to_string()))
            .on_stdout(move |c| out_events.lock().push(format!("out:{c}")))
            .on_stderr(move |c| err_events.lock().push(format!("err:{c}"))),
    )
    .await;
    events.lock().push("receipt".to_string());

    tokio::time::sleep(Duration::from_millis(100)).await;
    let events = events.lock().clone();

    assert_eq!(events.first().map(String::as_str), Some("pid"));
    assert_eq!(events.last().map(String::as_str), Some("receipt"));
    let streamed: String = events
        .iter()
        .filter_map(|e| e.strip_prefix("out:"))
        .collect();
    assert_eq!(streamed, receipt.stdout);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn stream_callbacks_never_overlap() {
    let busy = Arc::new(AtomicBool::new(false));
    let overlaps = Arc::new(AtomicUsize::new(0));

    let make_hook = |busy: Arc<AtomicBool>, overlaps: Arc<AtomicUsize>| {
        move |_: &str| {
            if busy.swap(true, Ordering::SeqCst) {
                overlaps.fetch_add(1, Ordering::SeqCst);
            }
            std::thread::sleep(Duration::from_micros(200));
            busy.store(false, Ordering::SeqCst);
        }
    };

    let receipt = run(
        sh("i=0; while [ $i -lt 300 ]; do echo o$i; echo e$i >&2; i=$((i+1)); done"),
        Hooks::new()
            .on_stdout(make_hook(Arc::clone(&busy), Arc::clone(&overlaps)))
            .on_stderr(make_hook(Arc::clone(&busy), Arc::clone(&overlaps))),
    )
    .await;

    assert_eq!(receipt.exit_code, 0);
    assert_eq!(overlaps.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn merged_hooks_see_both_streams() {
    let seen = Arc::new(Mutex::new(String::new()));
    let sink = Arc::clone(&seen);
    let receipt = run(
        sh("echo one; echo two >&2"),
        Hooks::merged(move |c| sink.lock().push_str(c)),
    )
    .await;

    let seen = seen.lock().clone();
    assert!(seen.contains("one\n"), "got: {seen}");
    assert!(seen.contains("two\n"), "got: {seen}");
    assert_eq!(seen.len(), receipt.stdout.len() + receipt.stderr.len());
}
