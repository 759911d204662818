// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Command name to absolute path resolution, cached per engine

use std::collections::HashMap;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;

use crate::ExecError;

/// Resolves bare command names against the search path.
///
/// Hits are cached for the lifetime of the cache; misses are not, so a
/// binary installed later is still found. Overrides take precedence over
/// everything: `Some(path)` pins a location, `None` makes the name
/// unresolvable even when it exists on the search path.
#[derive(Debug, Default)]
pub struct PathCache {
    /// Replaces `$PATH` when set.
    path: Option<Vec<PathBuf>>,
    /// Searched after the regular path.
    extra: Vec<PathBuf>,
    overrides: HashMap<String, Option<PathBuf>>,
    table: Mutex<HashMap<String, PathBuf>>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Search `dirs` instead of `$PATH`.
    pub fn path(mut self, dirs: impl IntoIterator<Item = impl Into<PathBuf>>) -> Self {
        self.path = Some(dirs.into_iter().map(Into::into).collect());
        self
    }

    /// Add a directory searched after the regular path.
    pub fn search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.extra.push(dir.into());
        self
    }

    /// Pin (`Some`) or hide (`None`) a command name.
    pub fn override_command(mut self, name: impl Into<String>, path: Option<PathBuf>) -> Self {
        self.overrides.insert(name.into(), path);
        self
    }

    /// Resolve `name` to an absolute path.
    ///
    /// Names containing a `/` are checked as paths without searching;
    /// relative ones are made absolute against the current directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf, ExecError> {
        if let Some(pinned) = self.overrides.get(name) {
            return pinned.clone().ok_or(ExecError::CommandNotFound);
        }
        if name.is_empty() {
            return Err(ExecError::CommandInvalid);
        }
        if name.contains('/') {
            let path = std::path::absolute(name).map_err(|_| ExecError::CommandInvalid)?;
            return match probe(&path) {
                Probe::Executable => Ok(path),
                Probe::NotExecutable => Err(ExecError::CommandInvalid),
                Probe::Missing => Err(ExecError::CommandNotFound),
            };
        }
        if let Some(hit) = self.table.lock().get(name) {
            return Ok(hit.clone());
        }

        let dirs = self.search_dirs();
        let search_path = match std::env::join_paths(&dirs) {
            Ok(joined) => joined,
            Err(e) => {
                tracing::warn!(name, error = %e, "unusable search path");
                return Err(ExecError::CommandNotFound);
            }
        };
        match which::which_in(name, Some(search_path), "/") {
            Ok(found) => {
                tracing::trace!(name, path = %found.display(), "resolved command");
                self.table.lock().insert(name.to_string(), found.clone());
                Ok(found)
            }
            // Something by that name exists but cannot be executed
            Err(_) if dirs.iter().any(|d| d.join(name).exists()) => Err(ExecError::CommandInvalid),
            Err(_) => Err(ExecError::CommandNotFound),
        }
    }

    /// Forget every cached resolution.
    pub fn clear(&self) {
        self.table.lock().clear();
    }

    fn search_dirs(&self) -> Vec<PathBuf> {
        let mut dirs = match &self.path {
            Some(dirs) => dirs.clone(),
            None => std::env::var_os("PATH")
                .map(|p| std::env::split_paths(&p).collect())
                .unwrap_or_default(),
        };
        dirs.extend(self.extra.iter().cloned());
        // Relative entries would make the result depend on the cwd
        dirs.retain(|d| d.is_absolute());
        dirs
    }
}

enum Probe {
    Executable,
    NotExecutable,
    Missing,
}

fn probe(path: &Path) -> Probe {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() && meta.permissions().mode() & 0o111 != 0 => Probe::Executable,
        Ok(_) => Probe::NotExecutable,
        Err(_) => Probe::Missing,
    }
}

#[cfg(test)]
#[path = "resolve_tests.rs"]
mod tests;
