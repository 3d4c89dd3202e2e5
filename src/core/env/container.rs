// kas-rs: BitBake project setup environment core
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment variable set with copy-on-write storage.
//!
//! ```text
//! Env (copy-on-write)
//! data: Arc<EnvData>
//! clone shares the Arc until the first set()/remove()
//! ```

use super::types::{EnvData, EnvKey};
use serde::{Serialize, Serializer, ser::SerializeMap};
use std::ffi::{OsStr, OsString};
use std::sync::Arc;

/// A set of environment variables with copy-on-write semantics.
///
/// Names are UTF-8; values keep the host's raw bytes so a pass-through
/// variable reaches the child exactly as the host exported it.
///
/// Clones share data until one of them is modified, so a host snapshot can
/// be handed around freely and a resolved environment can be given to
/// several readers without ever aliasing writes.
///
/// # Thread Safety
/// `Env` is `Send` and `Sync` due to its use of `Arc`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    data: Arc<EnvData>,
}

impl Env {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an environment variable, replacing any existing value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<OsString>) -> &mut Self {
        Arc::make_mut(&mut self.data)
            .vars_mut()
            .insert(EnvKey::new(key.into()), value.into());
        self
    }

    /// Gets a variable's value if it is valid UTF-8.
    ///
    /// Use [`Env::get_os`] for values that are only copied through.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.get_os(key).and_then(OsStr::to_str)
    }

    /// Gets a variable's raw value.
    #[must_use]
    pub fn get_os(&self, key: &str) -> Option<&OsStr> {
        self.data
            .vars()
            .get(&EnvKey::new(key))
            .map(OsString::as_os_str)
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data.vars().contains_key(&EnvKey::new(key))
    }

    /// Removes an environment variable.
    pub fn remove(&mut self, key: &str) -> &mut Self {
        if self.contains(key) {
            Arc::make_mut(&mut self.data)
                .vars_mut()
                .remove(&EnvKey::new(key));
        }
        self
    }

    /// Returns an iterator over environment variables in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &OsStr)> {
        self.data
            .vars()
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_os_str()))
    }

    /// Returns true if no variables are set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.vars().is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.vars().len()
    }

    /// Returns true if both values point at the same shared storage.
    #[must_use]
    pub fn shares_storage_with(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }
}

impl<K: Into<String>, V: Into<OsString>> FromIterator<(K, V)> for Env {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let vars = iter
            .into_iter()
            .map(|(k, v)| (EnvKey::new(k), v.into()))
            .collect();
        Self {
            data: Arc::new(EnvData::from_vars(vars)),
        }
    }
}

/// Serializes as a map; non-UTF-8 values are rendered lossily.
impl Serialize for Env {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, &value.to_string_lossy())?;
        }
        map.end()
    }
}
