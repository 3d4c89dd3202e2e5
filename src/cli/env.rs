// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments for the environment inspection and shell commands.

use clap::{Args, ValueEnum};

/// Config file chain shared by all project commands.
#[derive(Debug, Clone, Args)]
pub struct ConfigArgs {
    /// Config file(s), colon-separated: `base.yml:override.toml`.
    #[arg(value_name = "CONFIG")]
    pub config: String,
}

/// Output format for the `env` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum EnvFormat {
    /// `KEY=VALUE` lines.
    #[default]
    Plain,
    /// A JSON object.
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct EnvArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = EnvFormat::Plain)]
    pub format: EnvFormat,
}

/// Output format for the `dump` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DumpFormat {
    #[default]
    Yaml,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct DumpArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Output format.
    #[arg(long, value_enum, default_value_t = DumpFormat::Yaml)]
    pub format: DumpFormat,

    /// Line indent for JSON output (# of spaces, default 4). YAML output
    /// always uses two spaces; the option is ignored there with a warning.
    #[arg(long, value_name = "N")]
    pub indent: Option<usize>,

    /// Set env defaults to the captured environment values.
    #[arg(long)]
    pub resolve_env: bool,
}

#[derive(Debug, Clone, Args)]
pub struct ShellArgs {
    #[command(flatten)]
    pub config: ConfigArgs,

    /// Command line to run in the build directory.
    #[arg(short = 'c', long = "command", value_name = "CMD")]
    pub command: String,
}
