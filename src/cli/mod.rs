// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! kas [global options] <command>
//! build-dir <config>
//! env <config> [--format plain|json]
//! dump <config> [--format yaml|json] [--indent N] [--resolve-env]
//! shell <config> -c <cmd>
//! options <config>
//! inis <config>
//! version
//! ```

pub mod env;
pub mod global;


use crate::cli::env::{ConfigArgs, DumpArgs, EnvArgs, ShellArgs};
use crate::cli::global::GlobalOptions;
use clap::{Parser, Subcommand};

/// Build directory and environment setup for BitBake projects.
#[derive(Debug, Parser)]
#[command(
    name = "kas",
    author,
    version,
    about = "Setup tool for BitBake based projects",
    long_about = "Setup tool for BitBake based projects.\n\n\
                  Resolves the build directory (KAS_BUILD_DIR, then the config's\n\
                  build_dir, then ./build) and the exact environment handed to\n\
                  BitBake: only variables declared in the config's env section are\n\
                  passed, host values win over declared defaults, and the\n\
                  BB_ENV_EXTRAWHITE / BB_ENV_PASSTHROUGH_ADDITIONS allowlists are\n\
                  merged and exported under both names."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    Version,

    /// Resolves and creates the build directory, then prints it.
    #[command(name = "build-dir")]
    BuildDir(ConfigArgs),

    /// Prints the environment BitBake would be started with.
    Env(EnvArgs),

    /// Expands and dumps the final config to stdout.
    Dump(DumpArgs),

    /// Runs a command in the build directory with the resolved environment.
    Shell(ShellArgs),

    /// Lists all options and their values from the config files.
    Options(ConfigArgs),

    /// Lists the config files used.
    Inis(ConfigArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}
