// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build directory resolution.
//!
//! ```text
//! KAS_BUILD_DIR (host, non-empty)  ──┐
//! config build_dir (non-empty)     ──┼─> first match, joined onto cwd
//! <cwd>/build                      ──┘   if relative
//!                                          |
//!                                    ensure_build_dir()
//!                                    create_dir_all, idempotent
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::Config;
use crate::core::env::container::Env;
use crate::error::{FsError, KasResult};

/// Host variable overriding the build directory for the session.
pub const BUILD_DIR_VAR: &str = "KAS_BUILD_DIR";

/// Build directory name used when nothing else is configured.
pub const DEFAULT_BUILD_DIR: &str = "build";

/// Where the build directory came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildDirSource {
    /// `KAS_BUILD_DIR` on the host.
    Override,
    /// `build_dir` in the configuration.
    Config,
    /// `<cwd>/build`.
    Default,
}

impl fmt::Display for BuildDirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Override => write!(f, "{BUILD_DIR_VAR}"),
            Self::Config => write!(f, "config"),
            Self::Default => write!(f, "default"),
        }
    }
}

/// A resolved build directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildDir {
    path: PathBuf,
    source: BuildDirSource,
}

impl BuildDir {
    /// Resolves the build directory for `config` and creates it.
    ///
    /// # Errors
    ///
    /// Returns a `FsError` if the directory cannot be created.
    pub fn prepare(host: &Env, config: &Config, cwd: &Path) -> KasResult<Self> {
        let override_dir = host.get_os(BUILD_DIR_VAR).map(Path::new);
        let dir = resolve_build_dir(override_dir, config.build_dir.as_deref(), cwd);
        dir.ensure()?;
        info!(path = %dir.path.display(), source = %dir.source, "build directory");
        Ok(dir)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn source(&self) -> BuildDirSource {
        self.source
    }

    /// Creates the directory and its parents if missing.
    ///
    /// # Errors
    ///
    /// Returns a `FsError` if the directory cannot be created.
    pub fn ensure(&self) -> KasResult<()> {
        ensure_build_dir(&self.path)
    }

    #[must_use]
    pub fn into_path(self) -> PathBuf {
        self.path
    }
}

/// Picks the build directory: override, then configured path, then `<cwd>/build`.
///
/// Empty paths count as unset. Relative paths are joined onto `cwd`.
#[must_use]
pub fn resolve_build_dir(
    override_dir: Option<&Path>,
    configured: Option<&Path>,
    cwd: &Path,
) -> BuildDir {
    let (path, source) = if let Some(dir) = override_dir.filter(|d| !d.as_os_str().is_empty()) {
        (cwd.join(dir), BuildDirSource::Override)
    } else if let Some(dir) = configured.filter(|d| !d.as_os_str().is_empty()) {
        (cwd.join(dir), BuildDirSource::Config)
    } else {
        (cwd.join(DEFAULT_BUILD_DIR), BuildDirSource::Default)
    };
    debug!(path = %path.display(), %source, "resolved build directory");
    BuildDir { path, source }
}

/// Creates `path` and any missing parents.
///
/// Succeeds if the directory already exists, including when another process
/// creates it concurrently.
///
/// # Errors
///
/// Returns `FsError::NotADirectory` if `path` exists as something else, or
/// `FsError::IoError` if it cannot be created.
pub fn ensure_build_dir(path: &Path) -> KasResult<()> {
    if path.exists() && !path.is_dir() {
        return Err(FsError::NotADirectory(path.display().to_string()).into());
    }
    std::fs::create_dir_all(path).map_err(|source| FsError::IoError {
        path: path.display().to_string(),
        source,
    })?;
    Ok(())
}

#[cfg(test)]
mod tests;
