// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Project configuration.
//!
//! # Configuration Chain
//!
//! ```text
//! kas base.yml:machine.toml:local.yml
//!        |         |          |
//!        v         v          v
//!   ConfigLoader (layered, later wins)
//!        |
//!   --set KEY=VAL overrides
//!        |
//!        v
//!     Config { rest (header, repos, ...), build_dir, env }
//! ```
//!
//! # Example
//!
//! ```yaml
//! header:
//!   version: 14
//! machine: qemux86-64
//! build_dir: out
//! env:
//!   TESTVAR_DEFAULT_VAL: BAR
//!   TESTVAR_WHITELIST: ~
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use serde_yml::{Mapping, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;

use loader::ConfigLoader;
use types::{EnvDefault, EnvSection};

/// Complete project configuration.
///
/// Only `build_dir` and `env` are interpreted. Every other top-level key of a
/// kas project file (`header`, `machine`, `repos`, ...) is kept as loaded so
/// that `dump` re-emits the whole configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Top-level keys not interpreted here, in file order.
    #[serde(flatten)]
    pub rest: Mapping,
    /// Build directory, relative to the working directory unless absolute.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_dir: Option<PathBuf>,
    /// Declared environment variables.
    #[serde(skip_serializing_if = "EnvSection::is_empty")]
    pub env: EnvSection,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use kas_rs::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_file("kas-project.yml")?
    ///     .add_file_optional("local.toml")?
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML or YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, has an unknown extension,
    /// contains invalid syntax, or does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_file(path)?.build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Load configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid YAML or does not match the
    /// `Config` structure.
    pub fn parse_yaml(content: &str) -> Result<Self> {
        Self::builder().add_yaml_str(content).build()
    }

    /// Format configuration options for display, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        options.insert(
            "build_dir".to_string(),
            self.build_dir
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        for (key, value) in &self.rest {
            collect_options(&scalar_text(key), value, &mut options);
        }
        for (name, default) in self.env.iter() {
            let value = match default {
                EnvDefault::Literal(value) => format!("{value:?}"),
                EnvDefault::PassThroughOnly => "[pass-through]".to_string(),
            };
            options.insert(format!("env.{name}"), value);
        }

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}

/// Flattens nested mappings and sequences into dotted option keys.
fn collect_options(key: &str, value: &Value, options: &mut BTreeMap<String, String>) {
    match value {
        Value::Mapping(map) => {
            for (child, value) in map {
                collect_options(&format!("{key}.{}", scalar_text(child)), value, options);
            }
        }
        Value::Sequence(items) => {
            for (index, value) in items.iter().enumerate() {
                collect_options(&format!("{key}.{index}"), value, options);
            }
        }
        Value::Tagged(tagged) => collect_options(key, &tagged.value, options),
        Value::String(text) => {
            options.insert(key.to_string(), format!("{text:?}"));
        }
        scalar => {
            options.insert(key.to_string(), scalar_text(scalar));
        }
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::Null => "~".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_yml::to_string(other)
            .map_or_else(|_| String::new(), |text| text.trim_end().to_string()),
    }
}
