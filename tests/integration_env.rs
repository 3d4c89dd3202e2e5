// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for environment composition.
//!
//! Drives the composer through configs parsed the way users write them.

use kas_rs::config::Config;
use kas_rs::context::Context;
use kas_rs::core::env::alias::BITBAKE_ALLOWLIST;
use kas_rs::core::env::compose::compose_environment;
use kas_rs::core::env::container::Env;

fn project_config() -> Config {
    Config::parse_yaml(
        "
env:
  TESTVAR_DEFAULT_VAL: BAR
  TESTVAR_WHITELIST: ~
",
    )
    .unwrap()
}

fn host(vars: &[(&str, &str)]) -> Env {
    vars.iter().copied().collect()
}

// =============================================================================
// Declared variables
// =============================================================================

#[test]
fn env_only_declared_variables_reach_the_subprocess() {
    let host = host(&[
        ("PATH", "/usr/bin"),
        ("HOME", "/home/dev"),
        ("TESTVAR_WHITELIST", "hello"),
    ]);
    let env = compose_environment(&project_config().env, &host);

    let keys: Vec<_> = env.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, ["TESTVAR_DEFAULT_VAL", "TESTVAR_WHITELIST"]);
    assert_eq!(env.get("TESTVAR_DEFAULT_VAL"), Some("BAR"));
    assert_eq!(env.get("TESTVAR_WHITELIST"), Some("hello"));
}

#[test]
fn env_host_value_beats_declared_default() {
    let host = host(&[("TESTVAR_DEFAULT_VAL", "from-host")]);
    let env = compose_environment(&project_config().env, &host);
    assert_eq!(env.get("TESTVAR_DEFAULT_VAL"), Some("from-host"));
}

#[test]
fn env_empty_host_value_is_still_a_value() {
    let host = host(&[("TESTVAR_DEFAULT_VAL", ""), ("TESTVAR_WHITELIST", "")]);
    let env = compose_environment(&project_config().env, &host);
    assert_eq!(env.get("TESTVAR_DEFAULT_VAL"), Some(""));
    assert_eq!(env.get("TESTVAR_WHITELIST"), Some(""));
}

#[test]
fn env_pass_through_only_is_omitted_when_host_lacks_it() {
    let env = compose_environment(&project_config().env, &Env::new());
    assert!(!env.contains("TESTVAR_WHITELIST"));
    assert_eq!(env.len(), 1);
}

#[test]
fn env_empty_section_yields_empty_environment() {
    let host = host(&[("PATH", "/usr/bin"), ("TERM", "xterm")]);
    let env = compose_environment(&Config::default().env, &host);
    assert!(env.is_empty());
}

// =============================================================================
// Allowlist alias
// =============================================================================

#[test]
fn env_allowlist_from_legacy_name_exported_under_both() {
    let host = host(&[(BITBAKE_ALLOWLIST.legacy(), "SSTATE_DIR DL_DIR")]);
    let env = compose_environment(&project_config().env, &host);

    let expected = "SSTATE_DIR DL_DIR TESTVAR_DEFAULT_VAL TESTVAR_WHITELIST";
    assert_eq!(env.get("BB_ENV_EXTRAWHITE"), Some(expected));
    assert_eq!(env.get("BB_ENV_PASSTHROUGH_ADDITIONS"), Some(expected));
}

#[test]
fn env_allowlist_union_deduplicates_in_order() {
    let host = host(&[
        ("BB_ENV_EXTRAWHITE", "A B"),
        ("BB_ENV_PASSTHROUGH_ADDITIONS", "B C TESTVAR_WHITELIST"),
    ]);
    let env = compose_environment(&project_config().env, &host);

    insta::assert_snapshot!(
        env.get("BB_ENV_PASSTHROUGH_ADDITIONS").unwrap(),
        @"A B C TESTVAR_WHITELIST TESTVAR_DEFAULT_VAL"
    );
    assert_eq!(
        env.get("BB_ENV_EXTRAWHITE"),
        env.get("BB_ENV_PASSTHROUGH_ADDITIONS")
    );
}

#[test]
fn env_allowlist_absent_when_host_sets_neither_name() {
    let env = compose_environment(&project_config().env, &host(&[("PATH", "/bin")]));
    for name in BITBAKE_ALLOWLIST.names() {
        assert!(!env.contains(name), "{name} should not be exported");
    }
}

#[test]
fn env_malformed_allowlist_contributes_nothing() {
    let host = host(&[
        ("BB_ENV_EXTRAWHITE", "GOOD BAD=VALUE"),
        ("BB_ENV_PASSTHROUGH_ADDITIONS", "OTHER"),
    ]);
    let env = compose_environment(&Config::default().env, &host);
    assert_eq!(env.get("BB_ENV_EXTRAWHITE"), Some("OTHER"));
}

// =============================================================================
// Purity
// =============================================================================

#[test]
fn env_composition_leaves_host_untouched_and_is_repeatable() {
    let host = host(&[("TESTVAR_WHITELIST", "x"), ("BB_ENV_EXTRAWHITE", "A")]);
    let before = host.clone();
    let config = project_config();

    let first = compose_environment(&config.env, &host);
    let second = compose_environment(&config.env, &host);

    assert_eq!(host, before);
    assert_eq!(first, second);
    assert!(!first.shares_storage_with(&host));
}

#[test]
fn env_context_hands_each_call_its_own_copy() {
    let tmp = tempfile::tempdir().unwrap();
    let ctx = Context::new(project_config(), Env::new(), tmp.path()).unwrap();

    let mut mine = ctx.environment();
    mine.set("INJECTED", "1");
    mine.remove("TESTVAR_DEFAULT_VAL");

    let next = ctx.environment();
    assert!(!next.contains("INJECTED"));
    assert_eq!(next.get("TESTVAR_DEFAULT_VAL"), Some("BAR"));
}
