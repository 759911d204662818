// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use std::fs;
use tempfile::TempDir;

fn write_file(dir: &Path, name: &str, mode: u32) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, "#!/bin/sh\n").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(mode)).unwrap();
    path
}

#[test]
fn resolves_executable_on_path() {
    let dir = TempDir::new().unwrap();
    let tool = write_file(dir.path(), "tool", 0o755);

    let cache = PathCache::new().path([dir.path()]);
    assert_eq!(cache.resolve("tool").unwrap(), tool);
}

#[test]
fn missing_command_is_not_found() {
    let dir = TempDir::new().unwrap();
    let cache = PathCache::new().path([dir.path()]);
    assert_eq!(cache.resolve("nope"), Err(ExecError::CommandNotFound));
}

#[test]
fn non_executable_candidate_is_invalid() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "plain", 0o644);

    let cache = PathCache::new().path([dir.path()]);
    assert_eq!(cache.resolve("plain"), Err(ExecError::CommandInvalid));
}

#[test]
fn later_executable_wins_over_earlier_invalid() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();
    write_file(first.path(), "tool", 0o644);
    let good = write_file(second.path(), "tool", 0o755);

    let cache = PathCache::new().path([first.path(), second.path()]);
    assert_eq!(cache.resolve("tool").unwrap(), good);
}

#[test]
fn extra_search_dir_is_used() {
    let empty = TempDir::new().unwrap();
    let extra = TempDir::new().unwrap();
    let tool = write_file(extra.path(), "tool", 0o755);

    let cache = PathCache::new().path([empty.path()]).search_dir(extra.path());
    assert_eq!(cache.resolve("tool").unwrap(), tool);
}

#[test]
fn hits_are_cached_until_cleared() {
    let dir = TempDir::new().unwrap();
    let tool = write_file(dir.path(), "tool", 0o755);
    let cache = PathCache::new().path([dir.path()]);

    assert_eq!(cache.resolve("tool").unwrap(), tool);
    fs::remove_file(&tool).unwrap();
    assert_eq!(cache.resolve("tool").unwrap(), tool);

    cache.clear();
    assert_eq!(cache.resolve("tool"), Err(ExecError::CommandNotFound));
}

#[test]
fn overrides_pin_and_hide_commands() {
    let dir = TempDir::new().unwrap();
    write_file(dir.path(), "tool", 0o755);

    let cache = PathCache::new()
        .path([dir.path()])
        .override_command("tool", None)
        .override_command("alias", Some(PathBuf::from("/opt/alias")));

    assert_eq!(cache.resolve("tool"), Err(ExecError::CommandNotFound));
    assert_eq!(cache.resolve("alias").unwrap(), PathBuf::from("/opt/alias"));
}

#[yare::parameterized(
    empty_name    = { "" },
    directory     = { "/" },
)]
fn unusable_names_are_invalid(name: &str) {
    let cache = PathCache::new().path(Vec::<PathBuf>::new());
    assert_eq!(cache.resolve(name), Err(ExecError::CommandInvalid));
}

#[test]
fn slash_paths_skip_search() {
    let dir = TempDir::new().unwrap();
    let tool = write_file(dir.path(), "tool", 0o755);
    let cache = PathCache::new().path(Vec::<PathBuf>::new());

    assert_eq!(cache.resolve(tool.to_str().unwrap()).unwrap(), tool);
    assert_eq!(
        cache.resolve("/definitely/not/here"),
        Err(ExecError::CommandNotFound)
    );
}

#[test]
fn relative_slash_path_becomes_absolute() {
    let dir = tempfile::Builder::new()
        .prefix("resolve-rel")
        .tempdir_in(".")
        .unwrap();
    write_file(dir.path(), "tool", 0o755);
    let dir_name = dir.path().file_name().unwrap().to_str().unwrap();
    let cache = PathCache::new().path(Vec::<PathBuf>::new());

    let resolved = cache.resolve(&format!("./{dir_name}/tool")).unwrap();
    assert!(resolved.is_absolute());
    assert_eq!(
        resolved,
        std::env::current_dir().unwrap().join(dir_name).join("tool")
    );
}

#[test]
fn directory_on_search_path_is_invalid() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("tool")).unwrap();

    let cache = PathCache::new().path([dir.path()]);
    assert_eq!(cache.resolve("tool"), Err(ExecError::CommandInvalid));
}
