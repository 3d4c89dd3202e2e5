// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::Context;
use crate::config::Config;
use crate::core::build_dir::BuildDirSource;
use crate::core::env::container::Env;

fn config() -> Config {
    Config::parse_yaml(
        "
build_dir: relbuild
env:
  TESTVAR_DEFAULT_VAL: BAR
  TESTVAR_WHITELIST: ~
",
    )
    .unwrap()
}

#[test]
fn test_context_prepares_build_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = Context::new(config(), Env::new(), tmp.path()).unwrap();

    assert_eq!(ctx.build_dir(), tmp.path().join("relbuild"));
    assert_eq!(ctx.build_dir_info().source(), BuildDirSource::Config);
    assert!(ctx.build_dir().is_dir());
}

#[test]
fn test_environment_fresh_per_call() {
    let tmp = tempfile::tempdir().unwrap();
    let host: Env = [("PATH", "/usr/bin"), ("BB_ENV_PASSTHROUGH_ADDITIONS", "A")]
        .into_iter()
        .collect();
    let ctx = Context::new(config(), host, tmp.path()).unwrap();

    let mut first = ctx.environment();
    first.set("TESTVAR_DEFAULT_VAL", "mutated");
    let second = ctx.environment();

    assert_eq!(second.get("TESTVAR_DEFAULT_VAL"), Some("BAR"));
    assert_eq!(second.get("PATH"), None);
    assert_eq!(
        second.get("BB_ENV_EXTRAWHITE"),
        Some("A TESTVAR_DEFAULT_VAL TESTVAR_WHITELIST")
    );
    assert_eq!(ctx.host_env().get("TESTVAR_DEFAULT_VAL"), None);
}

#[test]
fn test_shell_carries_build_dir_and_env() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = Context::new(config(), Env::new(), tmp.path()).unwrap();

    let builder = ctx.shell("bitbake core-image-minimal");
    assert_eq!(
        builder.working_dir().map(std::path::PathBuf::as_path),
        Some(ctx.build_dir())
    );
    assert_eq!(builder.environment(), Some(&ctx.environment()));
}

#[tokio::test]
#[cfg(unix)]
async fn test_shell_runs_in_build_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let host: Env = [("TESTVAR_WHITELIST", "from-host")].into_iter().collect();
    let ctx = Context::new(config(), host, tmp.path()).unwrap();

    let output = ctx
        .shell("echo \"$TESTVAR_DEFAULT_VAL $TESTVAR_WHITELIST\" > env_out")
        .run()
        .await
        .unwrap();
    assert!(output.success());

    let written = std::fs::read_to_string(ctx.build_dir().join("env_out")).unwrap();
    assert_eq!(written.trim(), "BAR from-host");
}

#[tokio::test]
#[cfg(unix)]
async fn test_shell_passes_non_utf8_host_value_through() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let tmp = tempfile::tempdir().unwrap();
    let host: Env = [("TESTVAR_WHITELIST", OsStr::from_bytes(b"/srv/caf\xe9"))]
        .into_iter()
        .collect();
    let ctx = Context::new(config(), host, tmp.path()).unwrap();

    ctx.shell("printf %s \"$TESTVAR_WHITELIST\" > raw_out")
        .run()
        .await
        .unwrap();

    let written = std::fs::read(ctx.build_dir().join("raw_out")).unwrap();
    assert_eq!(written, b"/srv/caf\xe9");
}
