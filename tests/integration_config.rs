// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for configuration loading.
//!
//! Tests layered config chains on disk and how they feed the build directory
//! and the dump output.

use std::fs;

use kas_rs::cli::env::DumpFormat;
use kas_rs::cmd::dump::render_dump;
use kas_rs::config::Config;
use kas_rs::config::loader::ConfigLoader;
use kas_rs::config::types::EnvDefault;
use kas_rs::core::build_dir::{BUILD_DIR_VAR, BuildDir, BuildDirSource};
use kas_rs::core::env::container::Env;

// =============================================================================
// Layered chains
// =============================================================================

#[test]
fn config_chain_mixes_yaml_and_toml() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("base.yml");
    let local = tmp.path().join("local.toml");
    fs::write(
        &base,
        "build_dir: out\nenv:\n  DL_DIR: /srv/dl\n  SSTATE_DIR: ~\n",
    )
    .unwrap();
    fs::write(&local, "[env]\nDL_DIR = \"/tmp/dl\"\nMACHINE = \"qemux86-64\"\n").unwrap();

    let chain = format!("{}:{}", base.display(), local.display());
    let config = ConfigLoader::from_chain(&chain).unwrap().build().unwrap();

    assert_eq!(config.build_dir.as_deref(), Some("out".as_ref()));
    assert_eq!(
        config.env.get("DL_DIR").and_then(EnvDefault::as_literal),
        Some("/tmp/dl")
    );
    assert_eq!(config.env.get("SSTATE_DIR"), Some(&EnvDefault::PassThroughOnly));
    assert_eq!(
        config.env.get("MACHINE").and_then(EnvDefault::as_literal),
        Some("qemux86-64")
    );
}

#[test]
fn config_set_option_wins_over_files() {
    let tmp = tempfile::tempdir().unwrap();
    let base = tmp.path().join("kas.yml");
    fs::write(&base, "build_dir: out\n").unwrap();

    let config = ConfigLoader::from_chain(&base.display().to_string())
        .unwrap()
        .set_option("build_dir=elsewhere")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.build_dir.as_deref(), Some("elsewhere".as_ref()));
}

#[test]
fn config_chain_reports_missing_file() {
    let tmp = tempfile::tempdir().unwrap();
    let missing = tmp.path().join("nope.yml");
    assert!(ConfigLoader::from_chain(&missing.display().to_string()).is_err());
}

#[test]
fn config_loaded_files_listed_in_order() {
    let tmp = tempfile::tempdir().unwrap();
    let a = tmp.path().join("a.yml");
    let b = tmp.path().join("b.toml");
    fs::write(&a, "env: {}\n").unwrap();
    fs::write(&b, "").unwrap();

    let loader = ConfigLoader::from_chain(&format!("{}:{}", a.display(), b.display())).unwrap();
    let files: Vec<_> = loader.loaded_files().into_iter().map(|(_, p)| p).collect();
    assert_eq!(files, [a, b]);
}

// =============================================================================
// Build directory from loaded config
// =============================================================================

#[test]
fn config_build_dir_prepared_relative_to_cwd() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::parse_yaml("build_dir: nested/out\n").unwrap();

    let dir = BuildDir::prepare(&Env::new(), &config, tmp.path()).unwrap();
    assert_eq!(dir.path(), tmp.path().join("nested/out"));
    assert_eq!(dir.source(), BuildDirSource::Config);
    assert!(dir.path().is_dir());
}

#[test]
fn config_build_dir_override_from_host() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::parse_yaml("build_dir: out\n").unwrap();
    let host: Env = [(BUILD_DIR_VAR, "session")].into_iter().collect();

    let dir = BuildDir::prepare(&host, &config, tmp.path()).unwrap();
    assert_eq!(dir.path(), tmp.path().join("session"));
    assert_eq!(dir.source(), BuildDirSource::Override);
}

// =============================================================================
// Dump
// =============================================================================

#[test]
fn config_dump_feeds_back_as_single_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = Config::parse_yaml(
        "build_dir: out\nenv:\n  TESTVAR_DEFAULT_VAL: BAR\n  TESTVAR_WHITELIST: ~\n",
    )
    .unwrap();

    let dumped = tmp.path().join("dumped.yml");
    fs::write(&dumped, render_dump(&config, None, DumpFormat::Yaml, None).unwrap()).unwrap();

    assert_eq!(Config::from_file(&dumped).unwrap(), config);
}

#[test]
fn config_kas_project_file_round_trips_through_dump() {
    let tmp = tempfile::tempdir().unwrap();
    let project = tmp.path().join("kas-project.yml");
    fs::write(
        &project,
        "\
header:
  version: 14
machine: qemux86-64
distro: poky
repos:
  poky:
    url: https://git.yoctoproject.org/git/poky
    layers:
      meta:
      meta-poky:
local_conf_header:
  standard: |
    CONF_VERSION = \"2\"
    PACKAGE_CLASSES = \"package_rpm\"
env:
  TESTVAR_DEFAULT_VAL: BAR
  TESTVAR_WHITELIST: ~
",
    )
    .unwrap();

    let config = Config::from_file(&project).unwrap();
    assert_eq!(
        config.env.get("TESTVAR_DEFAULT_VAL").and_then(EnvDefault::as_literal),
        Some("BAR")
    );
    assert!(config.rest.contains_key("repos"));

    let dumped = tmp.path().join("dumped.yml");
    fs::write(&dumped, render_dump(&config, None, DumpFormat::Yaml, Some(4)).unwrap()).unwrap();
    assert_eq!(Config::from_file(&dumped).unwrap(), config);
}
