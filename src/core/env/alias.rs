// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Passthrough allowlist under a deprecated and a current variable name.
//!
//! ```text
//! host BB_ENV_EXTRAWHITE="A B"   host BB_ENV_PASSTHROUGH_ADDITIONS="B C"
//!               \                 /
//!                union (legacy first, dedup)
//!                        |
//!                      "A B C"  → written under both names
//! ```

use std::collections::HashSet;
use std::ffi::OsStr;
use tracing::warn;

use super::container::Env;

/// BitBake's allowlist: `BB_ENV_EXTRAWHITE` was renamed to
/// `BB_ENV_PASSTHROUGH_ADDITIONS`; both spellings are honored.
pub const BITBAKE_ALLOWLIST: AllowlistAlias =
    AllowlistAlias::new("BB_ENV_EXTRAWHITE", "BB_ENV_PASSTHROUGH_ADDITIONS");

/// Two names for the same whitespace-separated allowlist variable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllowlistAlias {
    legacy: &'static str,
    current: &'static str,
}

impl AllowlistAlias {
    #[must_use]
    pub const fn new(legacy: &'static str, current: &'static str) -> Self {
        Self { legacy, current }
    }

    /// The deprecated variable name.
    #[must_use]
    pub const fn legacy(&self) -> &'static str {
        self.legacy
    }

    /// The current variable name.
    #[must_use]
    pub const fn current(&self) -> &'static str {
        self.current
    }

    /// Both names, legacy first.
    #[must_use]
    pub const fn names(&self) -> [&'static str; 2] {
        [self.legacy, self.current]
    }

    /// Splits an allowlist value into variable names.
    ///
    /// A value holding a token that cannot be a variable name (contains `=`,
    /// NUL or U+FFFD from a non-UTF-8 host value) yields an empty list.
    #[must_use]
    pub fn parse_list(key: &str, value: &str) -> Vec<String> {
        let tokens: Vec<&str> = value.split_whitespace().collect();
        if let Some(bad) = tokens
            .iter()
            .find(|t| t.contains(['=', '\0', char::REPLACEMENT_CHARACTER]))
        {
            warn!(var = key, token = *bad, "ignoring malformed allowlist");
            return Vec::new();
        }
        tokens.into_iter().map(str::to_owned).collect()
    }

    /// Returns the union of both host lists, or `None` if the host sets neither.
    #[must_use]
    pub fn merge(&self, host: &Env) -> Option<Vec<String>> {
        let legacy = host.get_os(self.legacy).map(OsStr::to_string_lossy);
        let current = host.get_os(self.current).map(OsStr::to_string_lossy);
        if legacy.is_none() && current.is_none() {
            return None;
        }

        let mut union = NameList::default();
        for (key, value) in [(self.legacy, legacy), (self.current, current)] {
            if let Some(value) = value {
                union.extend(Self::parse_list(key, &value));
            }
        }
        Some(union.into_vec())
    }
}

/// Order-preserving, deduplicated list of names.
#[derive(Debug, Default)]
pub(super) struct NameList {
    seen: HashSet<String>,
    names: Vec<String>,
}

impl NameList {
    pub(super) fn from_vec(names: Vec<String>) -> Self {
        let mut list = Self::default();
        list.extend(names);
        list
    }

    pub(super) fn push(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.seen.insert(name.clone()) {
            self.names.push(name);
        }
    }

    pub(super) fn extend(&mut self, names: impl IntoIterator<Item = String>) {
        for name in names {
            self.push(name);
        }
    }

    pub(super) fn into_vec(self) -> Vec<String> {
        self.names
    }
}
