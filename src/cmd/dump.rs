// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dump the merged configuration.
//!
//! The output can be fed back as a single config file. Top-level keys that
//! are not interpreted here (`header`, `repos`, ...) are emitted as loaded.
//! With `--resolve-env` each env default is replaced by the value the
//! composer captured from the host; names that resolve to nothing keep the
//! pass-through marker.

use serde::Serialize;
use tracing::warn;

use crate::cli::env::{DumpArgs, DumpFormat};
use crate::config::Config;
use crate::core::env::compose::compose_environment;
use crate::core::env::container::Env;
use crate::error::Result;

/// Indent of JSON output when none is requested.
pub const DEFAULT_JSON_INDENT: usize = 4;

/// Render `config` as YAML or JSON.
///
/// `indent` only applies to JSON; YAML is always emitted with two-space
/// indentation, and a requested indent is reported and ignored.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render_dump(
    config: &Config,
    host: Option<&Env>,
    format: DumpFormat,
    indent: Option<usize>,
) -> Result<String> {
    let resolved;
    let config = if let Some(host) = host {
        let env = compose_environment(&config.env, host);
        resolved = Config {
            env: config.env.captured_from(&env),
            ..config.clone()
        };
        &resolved
    } else {
        config
    };

    match format {
        DumpFormat::Yaml => {
            if let Some(indent) = indent.filter(|&n| n != 2) {
                warn!(indent, "YAML output always uses two-space indentation");
            }
            Ok(serde_yml::to_string(config)?)
        }
        DumpFormat::Json => {
            let indent = " ".repeat(indent.unwrap_or(DEFAULT_JSON_INDENT));
            let formatter = serde_json::ser::PrettyFormatter::with_indent(indent.as_bytes());
            let mut buf = Vec::new();
            let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
            config.serialize(&mut serializer)?;
            buf.push(b'\n');
            Ok(String::from_utf8(buf)?)
        }
    }
}

/// Print the merged configuration.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn run_dump_command(args: &DumpArgs, config: &Config, host: &Env) -> Result<()> {
    let host = args.resolve_env.then_some(host);
    print!("{}", render_dump(config, host, args.format, args.indent)?);
    Ok(())
}
