// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-invocation context.
//!
//! ```text
//! Context::new(config, host snapshot, cwd)
//!   build_dir  resolved + created once
//!   environment()  composed fresh on every call
//!   shell()  ProcessBuilder in build_dir with that environment
//! ```

use std::path::Path;

use crate::config::Config;
use crate::core::build_dir::BuildDir;
use crate::core::env::compose::compose_environment;
use crate::core::env::container::Env;
use crate::core::env::current_env;
use crate::core::process::builder::ProcessBuilder;
use crate::error::Result;

/// Immutable state shared by all steps of one invocation.
#[derive(Debug, Clone)]
pub struct Context {
    config: Config,
    host: Env,
    build_dir: BuildDir,
}

impl Context {
    /// Creates a context and prepares the build directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the build directory cannot be created.
    pub fn new(config: Config, host: Env, cwd: &Path) -> Result<Self> {
        let build_dir = BuildDir::prepare(&host, &config, cwd)?;
        Ok(Self {
            config,
            host,
            build_dir,
        })
    }

    /// Creates a context from the running process' environment and directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or the build
    /// directory cannot be created.
    pub fn from_process(config: Config) -> Result<Self> {
        let cwd = std::env::current_dir()?;
        Self::new(config, current_env(), &cwd)
    }

    #[must_use]
    pub const fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub const fn host_env(&self) -> &Env {
        &self.host
    }

    #[must_use]
    pub fn build_dir(&self) -> &Path {
        self.build_dir.path()
    }

    #[must_use]
    pub const fn build_dir_info(&self) -> &BuildDir {
        &self.build_dir
    }

    /// Composes the environment for the next subprocess call.
    #[must_use]
    pub fn environment(&self) -> Env {
        compose_environment(&self.config.env, &self.host)
    }

    /// Prepares a shell command line to run in the build directory.
    pub fn shell(&self, command: impl Into<String>) -> ProcessBuilder {
        ProcessBuilder::raw(command)
            .cwd(self.build_dir())
            .env(self.environment())
    }
}

#[cfg(test)]
mod tests;
