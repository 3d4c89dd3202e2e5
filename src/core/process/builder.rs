// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process builder.
//!
//! ```text
//! ProcessBuilder
//!  • new(program) / raw(command line)
//!  • cwd / env / flag
//!
//! ProcessFlags: ALLOW_FAILURE
//! stdio is inherited from the parent
//! ```

use bitflags::bitflags;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use crate::core::env::container::Env;
use crate::error::ProcessError;

bitflags! {
    /// Flags controlling process execution behavior.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct ProcessFlags: u32 {
        /// Report a non-zero exit status instead of failing
        const ALLOW_FAILURE = 0x01;
    }
}

/// Result of a completed process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
}

impl ProcessOutput {
    pub(super) const fn new(exit_code: i32) -> Self {
        Self { exit_code }
    }

    /// Returns the process exit code (-1 when killed by a signal).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Builder for configuring and running a process.
///
/// When an environment is set, the child starts from an empty environment
/// and sees exactly that mapping.
#[derive(Debug)]
pub struct ProcessBuilder {
    program: PathBuf,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Option<Env>,
    flags: ProcessFlags,
}

impl ProcessBuilder {
    /// Creates a new `ProcessBuilder` for the given program.
    ///
    /// A bare name is resolved via the child's PATH when `run()` is called.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            cwd: None,
            env: None,
            flags: ProcessFlags::empty(),
        }
    }

    /// Creates a `ProcessBuilder` running `command` through `sh -c`.
    pub fn raw(command: impl Into<String>) -> Self {
        let mut builder = Self::new("sh");
        builder.args = vec!["-c".to_string(), command.into()];
        builder
    }

    /// Sets the working directory for the process.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Sets the exact environment of the process.
    #[must_use]
    pub fn env(mut self, env: Env) -> Self {
        self.env = Some(env);
        self
    }

    #[must_use]
    pub fn flag(mut self, flag: ProcessFlags) -> Self {
        self.flags |= flag;
        self
    }

    #[must_use]
    pub const fn program(&self) -> &PathBuf {
        &self.program
    }

    /// Returns the environment the child will see, if set.
    #[must_use]
    pub const fn environment(&self) -> Option<&Env> {
        self.env.as_ref()
    }

    #[must_use]
    pub const fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    pub(super) fn args_slice(&self) -> &[String] {
        &self.args
    }

    pub(super) const fn process_flags(&self) -> ProcessFlags {
        self.flags
    }

    /// Resolves a bare program name against the PATH the child will see.
    ///
    /// Falls back to this process' PATH when the child environment has none.
    ///
    /// # Errors
    ///
    /// Returns a `ProcessError::ExecutableNotFound` if nothing matches.
    pub fn resolve_program(&self) -> Result<PathBuf, ProcessError> {
        if self.program.components().count() > 1 {
            return Ok(self.program.clone());
        }

        let search_path = self
            .env
            .as_ref()
            .and_then(|env| env.get_os("PATH"))
            .map(OsStr::to_os_string)
            .or_else(|| std::env::var_os("PATH"));
        let cwd = self
            .cwd
            .clone()
            .or_else(|| std::env::current_dir().ok())
            .unwrap_or_else(|| PathBuf::from("."));

        which::which_in(&self.program, search_path, cwd).map_err(|_| {
            ProcessError::ExecutableNotFound {
                name: self.program.display().to_string(),
            }
        })
    }
}
