// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Build directory, environment and shell commands.

use std::fmt::Write as _;
use tracing::info;

use crate::cli::env::{EnvArgs, EnvFormat, ShellArgs};
use crate::context::Context;
use crate::core::env::container::Env;
use crate::core::process::builder::ProcessFlags;
use crate::error::Result;

/// Print the prepared build directory.
pub fn run_build_dir_command(ctx: &Context) {
    println!("{}", ctx.build_dir().display());
}

/// Render an environment as sorted `KEY=VALUE` lines or as a JSON object.
///
/// Non-UTF-8 values are shown lossily.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn render_env(env: &Env, format: EnvFormat) -> Result<String> {
    match format {
        EnvFormat::Plain => {
            let mut out = String::new();
            for (key, value) in env.iter() {
                let _ = writeln!(out, "{key}={}", value.to_string_lossy());
            }
            Ok(out)
        }
        EnvFormat::Json => Ok(serde_json::to_string_pretty(env)? + "\n"),
    }
}

/// Print the environment the next subprocess would receive.
///
/// # Errors
///
/// Returns an error if rendering fails.
pub fn run_env_command(args: &EnvArgs, ctx: &Context) -> Result<()> {
    print!("{}", render_env(&ctx.environment(), args.format)?);
    Ok(())
}

/// Run a command line in the build directory with the composed environment.
///
/// Returns the command's exit code; a command killed by a signal reports -1.
///
/// # Errors
///
/// Returns an error if the shell cannot be found or spawned.
pub async fn run_shell_command(args: &ShellArgs, ctx: &Context) -> Result<i32> {
    info!(
        command = %args.command,
        build_dir = %ctx.build_dir().display(),
        "running shell command"
    );
    let output = ctx
        .shell(args.command.as_str())
        .flag(ProcessFlags::ALLOW_FAILURE)
        .run()
        .await?;
    Ok(output.exit_code())
}
