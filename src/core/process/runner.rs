// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run()
//!   resolve_program()  (child PATH)
//!        |
//!   build_command()    args, cwd, env_clear + env
//!        |
//!   status()           stdio inherited
//!        |
//!   validate exit_code (skip if ALLOW_FAILURE)
//! ```

use std::path::Path;
use tokio::process::Command;
use tracing::{debug, trace};

use super::builder::{ProcessBuilder, ProcessFlags, ProcessOutput};
use crate::error::{ProcessError, Result};

impl ProcessBuilder {
    fn display_name(&self) -> String {
        self.program().file_stem().map_or_else(
            || "process".to_string(),
            |s| s.to_string_lossy().into_owned(),
        )
    }

    /// Returns the full command line as a string (for logging).
    fn command_line(&self) -> String {
        use std::fmt::Write as _;

        let mut cmd = self.program().display().to_string();
        for arg in self.args_slice() {
            if arg.contains(' ') {
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                let _ = write!(cmd, " {arg}");
            }
        }
        cmd
    }

    /// Spawns the process and waits for it to exit.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The program cannot be found.
    /// - Spawning the child process fails.
    /// - The process exits with a non-zero status (and `ALLOW_FAILURE` flag is not set).
    pub async fn run(self) -> Result<ProcessOutput> {
        let name = self.display_name();
        let cmd_line = self.command_line();
        let program = self.resolve_program()?;

        if let Some(cwd) = self.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(
            cmd = %cmd_line,
            env_vars = self.environment().map(crate::core::env::container::Env::len),
            "exec"
        );

        let status = self
            .build_command(&program)
            .status()
            .await
            .map_err(|source| ProcessError::SpawnFailed {
                command: cmd_line.clone(),
                source,
            })?;
        let output = ProcessOutput::new(status.code().unwrap_or(-1));

        if !self.process_flags().contains(ProcessFlags::ALLOW_FAILURE) && !output.success() {
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: output.exit_code(),
            }
            .into());
        }

        trace!(process = %name, exit_code = output.exit_code(), "completed");
        Ok(output)
    }

    fn build_command(&self, program: &Path) -> Command {
        let mut command = Command::new(program);
        command.args(self.args_slice());

        if let Some(cwd) = self.working_dir() {
            command.current_dir(cwd);
        }

        if let Some(env) = self.environment() {
            command.env_clear();
            command.envs(env.iter());
        }

        command.kill_on_drop(true);
        command
    }
}
