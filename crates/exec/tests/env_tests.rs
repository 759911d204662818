// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Environment overrides reaching child processes.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use ft_exec::{run, Hooks, Invocation};

fn printenv(key: &str) -> Invocation {
    Invocation::new("/bin/sh").args(["-c", &format!("printf '%s' \"${{{key}-unset}}\"")])
}

#[tokio::test]
async fn override_only_key_reaches_child() {
    let receipt = run(printenv("FT_ONLY_OVERRIDE").env("FT_ONLY_OVERRIDE", "yes"), Hooks::new()).await;
    assert_eq!(receipt.stdout, "yes");
}

#[tokio::test]
#[serial_test::serial]
async fn override_replaces_inherited_value() {
    std::env::set_var("FT_SHARED_KEY", "parent");
    let receipt = run(printenv("FT_SHARED_KEY").env("FT_SHARED_KEY", "child"), Hooks::new()).await;
    std::env::remove_var("FT_SHARED_KEY");
    assert_eq!(receipt.stdout, "child");
}

#[tokio::test]
#[serial_test::serial]
async fn keys_without_override_are_inherited() {
    std::env::set_var("FT_INHERITED_KEY", "from-parent");
    let receipt = run(printenv("FT_INHERITED_KEY").env("FT_OTHER", "x"), Hooks::new()).await;
    std::env::remove_var("FT_INHERITED_KEY");
    assert_eq!(receipt.stdout, "from-parent");
}

#[tokio::test]
async fn missing_key_stays_unset() {
    let receipt = run(printenv("FT_NEVER_SET_ANYWHERE"), Hooks::new()).await;
    assert_eq!(receipt.stdout, "unset");
}
