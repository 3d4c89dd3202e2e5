// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Logging --> Command Dispatch
//!   Version | BuildDir | Env | Dump | Shell | Options | Inis
//! ```

use std::process::ExitCode;

use kas_rs::cli::env::ConfigArgs;
use kas_rs::cli::global::GlobalOptions;
use kas_rs::cli::{self, Command};
use kas_rs::cmd::config::{run_inis_command, run_options_command};
use kas_rs::cmd::dump::run_dump_command;
use kas_rs::cmd::env::{run_build_dir_command, run_env_command, run_shell_command};
use kas_rs::config::Config;
use kas_rs::config::loader::ConfigLoader;
use kas_rs::context::Context;
use kas_rs::core::env::current_env;
use kas_rs::error::Result;
use kas_rs::logging::init_logging;
use kas_rs::logging::{LogConfig, LogLevel};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let log_config = build_log_config(&cli.global);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli).await
}

fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::WARN);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::DEBUG);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .build()
}

async fn dispatch_command(cli: &cli::Cli) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::BuildDir(args)) => {
            load_context(&cli.global, args).map(|ctx| run_build_dir_command(&ctx))
        }
        Some(Command::Env(args)) => load_context(&cli.global, &args.config)
            .and_then(|ctx| run_env_command(args, &ctx)),
        Some(Command::Dump(args)) => load_config(&cli.global, &args.config)
            .and_then(|config| run_dump_command(args, &config, &current_env())),
        Some(Command::Shell(args)) => {
            let code = match load_context(&cli.global, &args.config) {
                Ok(ctx) => run_shell_command(args, &ctx).await,
                Err(e) => Err(e),
            };
            match code {
                Ok(code) => return shell_exit_code(code),
                Err(e) => Err(e),
            }
        }
        Some(Command::Options(args)) => {
            load_config(&cli.global, args).map(|config| run_options_command(&config))
        }
        Some(Command::Inis(args)) => build_config_loader(&cli.global, args)
            .map(|loader| run_inis_command(&loader.format_loaded_files())),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

/// Passes the shell command's status through; signals map to failure.
fn shell_exit_code(code: i32) -> ExitCode {
    u8::try_from(code).map_or(ExitCode::FAILURE, ExitCode::from)
}

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions, args: &ConfigArgs) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::from_chain(&args.config)?;
    for option in &global.options {
        loader = loader.set_option(option)?;
    }
    Ok(loader)
}

fn load_config(global: &GlobalOptions, args: &ConfigArgs) -> Result<Config> {
    build_config_loader(global, args)?.build()
}

fn load_context(global: &GlobalOptions, args: &ConfigArgs) -> Result<Context> {
    Context::from_process(load_config(global, args)?)
}
