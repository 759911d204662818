// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use crate::{receipt_exit, receipt_ok, FakeRunner};
use tempfile::TempDir;

#[test]
fn lists_only_plists_sorted() {
    let dir = TempDir::new().unwrap();
    for name in ["b.plist", "a.plist", "notes.txt", "c.plist.bak"] {
        std::fs::write(dir.path().join(name), "").unwrap();
    }

    let found = list_launch_agents(dir.path());
    assert_eq!(
        found,
        vec![dir.path().join("a.plist"), dir.path().join("b.plist")]
    );
}

#[test]
fn missing_dir_lists_nothing() {
    let dir = TempDir::new().unwrap();
    assert!(list_launch_agents(&dir.path().join("absent")).is_empty());
}

#[tokio::test]
async fn current_uid_parses_id_output() {
    let runner = FakeRunner::new();
    runner.respond(ID, &["-u"], receipt_ok("501\n"));
    assert_eq!(current_uid(&runner).await.unwrap(), 501);
}

#[tokio::test]
async fn current_uid_rejects_garbage() {
    let runner = FakeRunner::new();
    runner.respond(ID, &["-u"], receipt_ok("nobody\n"));
    let err = current_uid(&runner).await.unwrap_err();
    assert!(matches!(err, AdapterError::Parse { .. }));
}

#[tokio::test(start_paused = true)]
async fn reload_bootouts_then_bootstraps() {
    let runner = FakeRunner::new();
    // bootout of an unloaded agent fails; that is fine
    runner.respond(LAUNCHCTL, &["bootout"], receipt_exit(5, "not loaded"));

    let outcome = reload_launch_agent(&runner, Path::new("/u/a.plist"), 501)
        .await
        .unwrap();

    assert_eq!(outcome, Reloaded::Bootstrapped);
    assert_eq!(
        runner.command_lines(),
        vec![
            "/bin/launchctl bootout gui/501 /u/a.plist",
            "/bin/launchctl bootstrap gui/501 /u/a.plist",
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn reload_falls_back_to_legacy_load() {
    let runner = FakeRunner::new();
    runner.respond(LAUNCHCTL, &["bootstrap"], receipt_exit(5, "I/O error"));

    let outcome = reload_launch_agent(&runner, Path::new("/u/a.plist"), 501)
        .await
        .unwrap();

    assert_eq!(outcome, Reloaded::Loaded);
    assert_eq!(
        runner.command_lines().last().map(String::as_str),
        Some("/bin/launchctl load -w /u/a.plist")
    );
}

#[tokio::test(start_paused = true)]
async fn reload_fails_when_both_paths_fail() {
    let runner = FakeRunner::new();
    runner.respond(LAUNCHCTL, &["bootstrap"], receipt_exit(5, "I/O error"));
    runner.respond(LAUNCHCTL, &["load"], receipt_exit(1, "nope"));

    let err = reload_launch_agent(&runner, Path::new("/u/a.plist"), 501)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("launchctl load"), "got: {err}");
}
