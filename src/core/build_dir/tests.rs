// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{BUILD_DIR_VAR, BuildDir, BuildDirSource, ensure_build_dir, resolve_build_dir};
use crate::config::Config;
use crate::core::env::container::Env;
use crate::error::{FsError, KasError};
use std::path::{Path, PathBuf};

#[test]
#[cfg(unix)]
fn test_default_is_cwd_build() {
    let dir = resolve_build_dir(None, None, Path::new("/proj"));
    assert_eq!(dir.path(), Path::new("/proj/build"));
    assert_eq!(dir.source(), BuildDirSource::Default);
}

#[test]
#[cfg(unix)]
fn test_override_wins_over_config() {
    let dir = resolve_build_dir(
        Some(Path::new("/tmp/mybuild")),
        Some(Path::new("relbuild")),
        Path::new("/proj"),
    );
    assert_eq!(dir.path(), Path::new("/tmp/mybuild"));
    assert_eq!(dir.source(), BuildDirSource::Override);
}

#[test]
#[cfg(unix)]
fn test_relative_override_joins_cwd() {
    let dir = resolve_build_dir(Some(Path::new("out/bb")), None, Path::new("/proj"));
    assert_eq!(dir.path(), Path::new("/proj/out/bb"));
}

#[test]
#[cfg(unix)]
fn test_config_used_without_override() {
    let dir = resolve_build_dir(None, Some(Path::new("relbuild")), Path::new("/proj"));
    assert_eq!(dir.path(), Path::new("/proj/relbuild"));
    assert_eq!(dir.source(), BuildDirSource::Config);

    let dir = resolve_build_dir(None, Some(Path::new("/abs/build")), Path::new("/proj"));
    assert_eq!(dir.into_path(), PathBuf::from("/abs/build"));
}

#[test]
#[cfg(unix)]
fn test_empty_values_count_as_unset() {
    let dir = resolve_build_dir(Some(Path::new("")), Some(Path::new("")), Path::new("/proj"));
    assert_eq!(dir.path(), Path::new("/proj/build"));
    assert_eq!(dir.source(), BuildDirSource::Default);
}

#[test]
fn test_source_display() {
    insta::assert_snapshot!(
        [
            BuildDirSource::Override,
            BuildDirSource::Config,
            BuildDirSource::Default
        ]
        .map(|s| s.to_string())
        .join(","),
        @"KAS_BUILD_DIR,config,default"
    );
}

#[test]
fn test_ensure_creates_parents_and_is_idempotent() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("a").join("b").join("build");

    ensure_build_dir(&path).unwrap();
    assert!(path.is_dir());
    ensure_build_dir(&path).unwrap();
    assert!(path.is_dir());
}

#[test]
fn test_ensure_concurrent_callers() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("shared").join("build");

    std::thread::scope(|s| {
        let handles: Vec<_> = (0..8).map(|_| s.spawn(|| ensure_build_dir(&path))).collect();
        for handle in handles {
            handle.join().unwrap().unwrap();
        }
    });
    assert!(path.is_dir());
}

#[test]
fn test_ensure_rejects_file() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("build");
    std::fs::write(&path, "not a dir").unwrap();

    let err = ensure_build_dir(&path).unwrap_err();
    match err {
        KasError::Fs(fs) => assert!(matches!(*fs, FsError::NotADirectory(_))),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_ensure_fails_below_file() {
    let tmp = tempfile::tempdir().unwrap();
    let file = tmp.path().join("file");
    std::fs::write(&file, "").unwrap();

    let err = ensure_build_dir(&file.join("build")).unwrap_err();
    assert!(matches!(err, KasError::Fs(_)));
}

#[test]
fn test_prepare_uses_host_override() {
    let tmp = tempfile::tempdir().unwrap();
    let override_dir = tmp.path().join("override");
    let host: Env = [(BUILD_DIR_VAR, override_dir.display().to_string())]
        .into_iter()
        .collect();
    let config = Config {
        build_dir: Some(PathBuf::from("configured")),
        ..Config::default()
    };

    let dir = BuildDir::prepare(&host, &config, tmp.path()).unwrap();
    assert_eq!(dir.path(), override_dir);
    assert_eq!(dir.source(), BuildDirSource::Override);
    assert!(override_dir.is_dir());
    assert!(!tmp.path().join("configured").exists());
}

#[test]
fn test_prepare_defaults_to_cwd_build() {
    let tmp = tempfile::tempdir().unwrap();
    let dir = BuildDir::prepare(&Env::new(), &Config::default(), tmp.path()).unwrap();
    assert_eq!(dir.path(), tmp.path().join("build"));
    assert!(dir.path().is_dir());
}
