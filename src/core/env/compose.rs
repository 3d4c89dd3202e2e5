// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Composition of the environment handed to toolchain subprocesses.
//!
//! ```text
//! EnvSection (declaration order)        host Env (snapshot)
//!        |                                   |
//!        +--> PassThroughOnly: host value or omitted
//!        +--> Literal(v):      host value, else v
//!                                            |
//!        allowlist alias pair  <-------------+
//!        union(legacy, current) + declared names
//!        written under both names (only if host has one)
//!                     |
//!                     v
//!               fresh Env (never aliases host)
//! ```

use tracing::{debug, trace};

use super::alias::{AllowlistAlias, BITBAKE_ALLOWLIST, NameList};
use super::container::Env;
use crate::config::types::{EnvDefault, EnvSection};

/// Computes the environment for one subprocess call.
///
/// Equivalent to `EnvComposer::new(section).compose(host)` with the BitBake
/// allowlist pair.
#[must_use]
pub fn compose_environment(section: &EnvSection, host: &Env) -> Env {
    EnvComposer::new(section).compose(host)
}

/// Builds resolved environments from a declared env section.
#[derive(Debug, Clone, Copy)]
pub struct EnvComposer<'a> {
    section: &'a EnvSection,
    alias: AllowlistAlias,
}

impl<'a> EnvComposer<'a> {
    #[must_use]
    pub const fn new(section: &'a EnvSection) -> Self {
        Self {
            section,
            alias: BITBAKE_ALLOWLIST,
        }
    }

    /// Uses a different allowlist variable pair.
    #[must_use]
    pub const fn with_alias(mut self, alias: AllowlistAlias) -> Self {
        self.alias = alias;
        self
    }

    /// Composes a fresh environment from the host snapshot.
    ///
    /// Only declared variables and the allowlist pair are ever present; the
    /// host is read, never modified.
    #[must_use]
    pub fn compose(&self, host: &Env) -> Env {
        let mut env = Env::new();

        for (name, default) in self.section.iter() {
            match (host.get_os(name), default) {
                (Some(value), _) => {
                    trace!(var = name, source = "host", "env");
                    env.set(name, value);
                }
                (None, EnvDefault::Literal(value)) => {
                    trace!(var = name, source = "default", "env");
                    env.set(name, value.as_str());
                }
                (None, EnvDefault::PassThroughOnly) => {
                    trace!(var = name, "env omitted, not set on host");
                }
            }
        }

        if let Some(union) = self.alias.merge(host) {
            let mut names = NameList::from_vec(union);
            names.extend(self.section.names().map(str::to_owned));
            let value = names.into_vec().join(" ");
            for key in self.alias.names() {
                env.set(key, value.as_str());
            }
        }

        debug!(
            declared = self.section.len(),
            resolved = env.len(),
            "composed subprocess environment"
        );
        env
    }
}
