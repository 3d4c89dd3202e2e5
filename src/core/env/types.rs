// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Key and storage types for environment variable sets.
//!
//! ```text
//! EnvKey:  case-insensitive on Windows (PATH == Path), exact elsewhere
//! EnvData: BTreeMap<EnvKey, OsString> for deterministic order
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;
use std::ffi::OsString;

/// An environment variable key with platform case rules.
#[derive(Debug, Clone, Eq)]
pub(super) struct EnvKey(String);

impl EnvKey {
    pub(super) fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub(super) fn as_str(&self) -> &str {
        &self.0
    }

    fn folded(&self) -> Cow<'_, str> {
        if cfg!(windows) {
            Cow::Owned(self.0.to_ascii_lowercase())
        } else {
            Cow::Borrowed(&self.0)
        }
    }
}

impl PartialEq for EnvKey {
    fn eq(&self, other: &Self) -> bool {
        self.folded() == other.folded()
    }
}

impl std::hash::Hash for EnvKey {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.folded().hash(state);
    }
}

impl PartialOrd for EnvKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EnvKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.folded().cmp(&other.folded())
    }
}

/// Shared environment data for copy-on-write semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct EnvData {
    vars: BTreeMap<EnvKey, OsString>,
}

impl EnvData {
    pub(super) const fn from_vars(vars: BTreeMap<EnvKey, OsString>) -> Self {
        Self { vars }
    }

    pub(super) const fn vars(&self) -> &BTreeMap<EnvKey, OsString> {
        &self.vars
    }

    pub(super) const fn vars_mut(&mut self) -> &mut BTreeMap<EnvKey, OsString> {
        &mut self.vars
    }
}
