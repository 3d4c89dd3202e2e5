// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration loading from multiple sources.
//!
//! # Loader Pipeline
//!
//! ```text
//! ConfigLoader::new()
//!   .add_file(kas.yml)          (.toml / .yml / .yaml)
//!   .add_file_optional(local)
//!   .add_toml_str() / .add_yaml_str()
//!   .set("env.FOO", "bar")
//!        |
//!        v
//!    build() --> Config
//! ```

use config::FileFormat;
use std::path::{Path, PathBuf};

use super::Config;
use crate::error::{ConfigError, Result};

/// Builder for loading configuration from multiple sources.
pub struct ConfigLoader {
    builder: config::ConfigBuilder<config::builder::DefaultState>,
    files: Vec<(String, PathBuf)>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            files: Vec::new(),
        }
    }

    /// Creates a loader from a colon-separated chain of files.
    ///
    /// `base.yml:override.yml` layers `override.yml` on top of `base.yml`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::NotFound` if a file in the chain does not exist,
    /// or a `ConfigError::ParseError` if the chain is empty or a file has an
    /// unsupported extension.
    pub fn from_chain(chain: &str) -> Result<Self> {
        let mut loader = Self::new();
        let mut any = false;
        for part in chain.split(':').filter(|p| !p.is_empty()) {
            let path = Path::new(part);
            if !path.is_file() {
                return Err(ConfigError::NotFound(part.to_string()).into());
            }
            loader = loader.add_file(path)?;
            any = true;
        }
        if !any {
            return Err(ConfigError::ParseError {
                path: chain.to_string(),
                message: "no configuration file given".to_string(),
            }
            .into());
        }
        Ok(loader)
    }

    /// Adds a required configuration file, picking the format by extension.
    ///
    /// The file will be read when `build()` is called. If the file doesn't exist
    /// or contains invalid syntax, `build()` will return an error.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ParseError` if the extension is not supported.
    pub fn add_file<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        self.add_file_inner(path.as_ref(), true)
    }

    /// Adds a configuration file that is skipped when missing.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ParseError` if the extension is not supported.
    pub fn add_file_optional<P: AsRef<Path>>(self, path: P) -> Result<Self> {
        self.add_file_inner(path.as_ref(), false)
    }

    fn add_file_inner(mut self, path: &Path, required: bool) -> Result<Self> {
        let format = format_for(path)?;
        self.builder = self.builder.add_source(
            config::File::from(path)
                .format(format)
                .required(required),
        );
        if required || path.exists() {
            let kind = if required { "file" } else { "optional" };
            self.files.push((kind.to_string(), path.to_path_buf()));
        }
        Ok(self)
    }

    #[must_use]
    pub fn add_toml_str(self, content: &str) -> Self {
        self.add_str(content, FileFormat::Toml)
    }

    #[must_use]
    pub fn add_yaml_str(self, content: &str) -> Self {
        self.add_str(content, FileFormat::Yaml)
    }

    fn add_str(mut self, content: &str, format: FileFormat) -> Self {
        self.builder = self
            .builder
            .add_source(config::File::from_str(content, format));
        self.files
            .push(("string".to_string(), PathBuf::from("<string>")));
        self
    }

    /// Sets a configuration override.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is invalid or if the value cannot be converted
    /// to a configuration value.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| ConfigError::ParseError {
                path: key.to_string(),
                message: e.to_string(),
            })?;
        Ok(self)
    }

    /// Applies a `KEY=VALUE` override as given on the command line.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::ParseError` if the option has no `=`.
    pub fn set_option(self, option: &str) -> Result<Self> {
        let (key, value) = option
            .split_once('=')
            .ok_or_else(|| ConfigError::ParseError {
                path: option.to_string(),
                message: "expected KEY=VALUE".to_string(),
            })?;
        self.set(key.trim(), value)
    }

    /// Builds the configuration from all added sources.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Required configuration files are missing.
    /// - Configuration files have invalid syntax.
    /// - The merged configuration cannot be deserialized into the `Config` struct.
    pub fn build(self) -> Result<Config> {
        let cfg = self.builder.build()?;
        let config: Config = cfg.try_deserialize()?;
        tracing::debug!(
            sources = self.files.len(),
            env_vars = config.env.len(),
            "configuration loaded"
        );
        Ok(config)
    }

    #[must_use]
    pub fn loaded_files(&self) -> Vec<(String, PathBuf)> {
        self.files.clone()
    }

    #[must_use]
    pub fn format_loaded_files(&self) -> Vec<String> {
        self.files
            .iter()
            .enumerate()
            .map(|(i, (source, path))| format!("{}. [{}] {}", i + 1, source, path.display()))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn format_for(path: &Path) -> Result<FileFormat> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => Ok(FileFormat::Toml),
        Some("yml" | "yaml") => Ok(FileFormat::Yaml),
        _ => Err(ConfigError::ParseError {
            path: path.display().to_string(),
            message: "unsupported config format (expected .toml, .yml or .yaml)".to_string(),
        }
        .into()),
    }
}
